use crate::data::database::{Database, DbConnection, last_insert_rowid};
use crate::data::models::order::{NewOrder, Order, OrderDetail, OrderStatus};
use crate::data::models::order_item::{NewOrderItem, OrderItem, OrderItemDetail};
use crate::data::models::schema::{businesses, order_items, orders, products, users};
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::collections::HashMap;

/// An order row with the seller's name and the buyer's first and last name.
type OrderHeader = (Order, String, String, String);

/// Reads go through the pool. Writes are associated functions taking a
/// connection so `OrderService` can run them inside its own transaction.
pub struct OrderRepo {
    db: Database,
}

impl OrderRepo {
    pub fn new(db: &Database) -> Self {
        OrderRepo { db: db.clone() }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Order>, result::Error> {
        let mut conn = self.db.get_connection().await?;
        Self::find(&mut conn, id).await
    }

    pub async fn get_detail(&self, id: i32) -> Result<Option<OrderDetail>, result::Error> {
        let mut conn = self.db.get_connection().await?;
        Self::load_detail(&mut conn, id).await
    }

    pub async fn list_for_user(&self, user: i32) -> Result<Vec<OrderDetail>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let rows: Vec<OrderHeader> = orders::table
            .inner_join(businesses::table)
            .inner_join(users::table)
            .filter(orders::user_id.eq(user))
            .order((orders::created_at.desc(), orders::id.desc()))
            .select((
                Order::as_select(),
                businesses::name,
                users::first_name,
                users::last_name,
            ))
            .load(&mut conn)
            .await?;

        attach_items(&mut conn, rows).await
    }

    pub async fn list_for_business(&self, business: i32) -> Result<Vec<OrderDetail>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let rows: Vec<OrderHeader> = orders::table
            .inner_join(businesses::table)
            .inner_join(users::table)
            .filter(orders::business_id.eq(business))
            .order((orders::created_at.desc(), orders::id.desc()))
            .select((
                Order::as_select(),
                businesses::name,
                users::first_name,
                users::last_name,
            ))
            .load(&mut conn)
            .await?;

        attach_items(&mut conn, rows).await
    }

    pub async fn find(conn: &mut DbConnection, id: i32) -> Result<Option<Order>, result::Error> {
        orders::table
            .find(id)
            .select(Order::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn load_detail(
        conn: &mut DbConnection,
        id: i32,
    ) -> Result<Option<OrderDetail>, result::Error> {
        let row: Option<OrderHeader> = orders::table
            .inner_join(businesses::table)
            .inner_join(users::table)
            .filter(orders::id.eq(id))
            .select((
                Order::as_select(),
                businesses::name,
                users::first_name,
                users::last_name,
            ))
            .first(conn)
            .await
            .optional()?;

        match row {
            Some(row) => Ok(attach_items(conn, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Inserts the order header and returns its id.
    pub async fn insert(conn: &mut DbConnection, order: &NewOrder<'_>) -> Result<i32, result::Error> {
        diesel::insert_into(orders::table)
            .values(order)
            .execute(conn)
            .await?;

        last_insert_rowid(conn).await
    }

    pub async fn insert_item(
        conn: &mut DbConnection,
        item: &NewOrderItem,
    ) -> Result<usize, result::Error> {
        diesel::insert_into(order_items::table)
            .values(item)
            .execute(conn)
            .await
    }

    pub async fn items_of(conn: &mut DbConnection, order: i32) -> Result<Vec<OrderItem>, result::Error> {
        order_items::table
            .filter(order_items::order_id.eq(order))
            .order(order_items::id.asc())
            .select(OrderItem::as_select())
            .load(conn)
            .await
    }

    /// Flips a live order to `cancelled`. Touches no row when the order is
    /// already terminal, which is what makes restocking happen at most once.
    pub async fn mark_cancelled(
        conn: &mut DbConnection,
        id: i32,
        reason: Option<&str>,
    ) -> Result<usize, result::Error> {
        diesel::update(
            orders::table.filter(orders::id.eq(id)).filter(
                orders::status
                    .ne_all([OrderStatus::Cancelled.as_str(), OrderStatus::Delivered.as_str()]),
            ),
        )
        .set((
            orders::status.eq(OrderStatus::Cancelled.as_str()),
            orders::cancellation_reason.eq(reason),
        ))
        .execute(conn)
        .await
    }

    /// Moves the order from `from` to `to` only if it is still in `from`.
    pub async fn swap_status(
        conn: &mut DbConnection,
        id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<usize, result::Error> {
        diesel::update(
            orders::table
                .filter(orders::id.eq(id))
                .filter(orders::status.eq(from.as_str())),
        )
        .set(orders::status.eq(to.as_str()))
        .execute(conn)
        .await
    }
}

async fn attach_items(
    conn: &mut DbConnection,
    rows: Vec<OrderHeader>,
) -> Result<Vec<OrderDetail>, result::Error> {
    let ids: Vec<i32> = rows.iter().map(|(order, ..)| order.id).collect();

    let item_rows: Vec<(OrderItem, String, Option<String>)> = order_items::table
        .inner_join(products::table)
        .filter(order_items::order_id.eq_any(&ids))
        .order(order_items::id.asc())
        .select((OrderItem::as_select(), products::name, products::image_url))
        .load(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<OrderItemDetail>> = HashMap::new();
    for (item, product_name, product_image) in item_rows {
        grouped.entry(item.order_id).or_default().push(OrderItemDetail {
            item,
            product_name,
            product_image,
        });
    }

    Ok(rows
        .into_iter()
        .map(|(order, business_name, buyer_first_name, buyer_last_name)| OrderDetail {
            items: grouped.remove(&order.id).unwrap_or_default(),
            order,
            business_name,
            buyer_first_name,
            buyer_last_name,
        })
        .collect())
}
