use crate::data::models::business::Business;
use crate::data::models::order_item::OrderItemDetail;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Business, foreign_key = business_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub business_id: i32,
    pub total_amount_cents: i64,
    pub delivery_address: String,
    pub delivery_instructions: Option<String>,
    pub payment_method: String,
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Order {
    /// Unknown strings can only come from a hand-edited row; treat them as pending.
    pub fn order_status(&self) -> OrderStatus {
        self.status.parse().unwrap_or(OrderStatus::Pending)
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub business_id: i32,
    pub total_amount_cents: i64,
    pub delivery_address: &'a str,
    pub delivery_instructions: Option<&'a str>,
    pub payment_method: &'a str,
    pub status: &'a str,
}

/// Order as returned to clients: the row, who is selling, who is buying, and
/// its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
    pub business_name: String,
    pub buyer_first_name: String,
    pub buyer_last_name: String,
    pub items: Vec<OrderItemDetail>,
}

/// Order statuses, declared in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Forward moves along the workflow, or a jump to `Cancelled` from any
    /// non-terminal state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == OrderStatus::Cancelled || next > *self
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
