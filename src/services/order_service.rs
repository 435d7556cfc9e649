use crate::data::database::{Database, acquire_write_lock};
use crate::data::models::order::{NewOrder, Order, OrderDetail, OrderStatus};
use crate::data::models::order_item::NewOrderItem;
use crate::data::models::product::Product;
use crate::data::repos::implementors::business_repo::BusinessRepo;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::OrderServiceError;
use crate::utils::validation::{self, not_blank};
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use std::collections::HashMap;
use validator::Validate;

const DEFAULT_PAYMENT_METHOD: &str = "cash";

#[derive(Debug, Clone, Validate, serde::Serialize)]
pub struct OrderItemInput {
    pub product_id: i32,
    #[validate(range(min = 1, message = "Item quantity must be greater than zero"))]
    pub quantity: i32,
    /// Price the client believes it is paying, in cents. Checked, never trusted.
    pub unit_price_cents: Option<i64>,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateOrderInput {
    pub user_id: i32,
    pub business_id: i32,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,
    pub total_amount_cents: Option<i64>,
    #[validate(custom(function = "not_blank", message = "Delivery address is required"))]
    pub delivery_address: String,
    pub delivery_instructions: Option<String>,
    pub payment_method: Option<String>,
}

/// Owns the order lifecycle: creation with stock reservation, forward-only
/// status changes, and cancellation with a single restock.
pub struct OrderService {
    db: Database,
}

impl OrderService {
    pub fn new(db: &Database) -> Self {
        OrderService { db: db.clone() }
    }

    /// Validates the request, then in one transaction prices every item from
    /// the store, inserts the order and its items, and takes the stock. Any
    /// failure leaves no trace.
    pub async fn create_order(
        &self,
        input: CreateOrderInput,
    ) -> Result<OrderDetail, OrderServiceError> {
        let errors = validation::check(&input);
        if !errors.is_empty() {
            return Err(OrderServiceError::Validation(errors));
        }

        if BusinessRepo::new(&self.db)
            .get_by_id(input.business_id)
            .await?
            .is_none()
        {
            return Err(OrderServiceError::BusinessNotFound);
        }

        let mut conn = self.db.get_connection().await?;

        let order_id = conn
            .transaction::<_, OrderServiceError, _>(|conn| {
                async move {
                    acquire_write_lock(conn).await?;

                    let ids: Vec<i32> = input.items.iter().map(|item| item.product_id).collect();
                    let products: HashMap<i32, Product> = ProductRepo::load_many(conn, &ids)
                        .await?
                        .into_iter()
                        .map(|product| (product.id, product))
                        .collect();

                    let mut priced = Vec::with_capacity(input.items.len());
                    let mut total_cents: i64 = 0;

                    for item in &input.items {
                        let product = products
                            .get(&item.product_id)
                            .filter(|p| {
                                p.is_active && p.is_available && p.business_id == input.business_id
                            })
                            .ok_or(OrderServiceError::ProductUnavailable(item.product_id))?;

                        if let Some(claimed) = item.unit_price_cents
                            && claimed != product.price_cents
                        {
                            return Err(OrderServiceError::PriceMismatch(product.id));
                        }

                        total_cents = product
                            .price_cents
                            .checked_mul(i64::from(item.quantity))
                            .and_then(|line| total_cents.checked_add(line))
                            .ok_or_else(|| {
                                OrderServiceError::Validation(vec![
                                    "Order total is too large".to_string(),
                                ])
                            })?;

                        priced.push((item, product.price_cents));
                    }

                    if let Some(claimed) = input.total_amount_cents
                        && claimed != total_cents
                    {
                        return Err(OrderServiceError::TotalMismatch);
                    }

                    let new_order = NewOrder {
                        user_id: input.user_id,
                        business_id: input.business_id,
                        total_amount_cents: total_cents,
                        delivery_address: input.delivery_address.trim(),
                        delivery_instructions: input.delivery_instructions.as_deref(),
                        payment_method: input
                            .payment_method
                            .as_deref()
                            .unwrap_or(DEFAULT_PAYMENT_METHOD),
                        status: OrderStatus::Pending.as_str(),
                    };

                    let order_id = OrderRepo::insert(conn, &new_order).await?;

                    for (item, unit_price_cents) in priced {
                        OrderRepo::insert_item(
                            conn,
                            &NewOrderItem {
                                order_id,
                                product_id: item.product_id,
                                quantity: item.quantity,
                                unit_price_cents,
                            },
                        )
                        .await?;

                        let taken = ProductRepo::take_stock(conn, item.product_id, item.quantity).await?;
                        if taken == 0 {
                            return Err(OrderServiceError::InsufficientStock(item.product_id));
                        }
                    }

                    Ok(order_id)
                }
                .scope_boxed()
            })
            .await?;

        tracing::info!("Order {} created", order_id);

        OrderRepo::load_detail(&mut conn, order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    /// Cancels a live order and puts its stock back. Cancelling an order that
    /// is already cancelled returns it unchanged.
    pub async fn cancel_order(
        &self,
        order_id: i32,
        actor_user_id: i32,
        reason: Option<String>,
    ) -> Result<OrderDetail, OrderServiceError> {
        let order = self.get_order_row(order_id).await?;
        self.authorize(&order, actor_user_id, true).await?;

        self.cancel_unchecked(order_id, reason).await
    }

    /// Applies a status change requested by the business owner. `cancelled`
    /// goes through the cancellation path so stock is restored.
    pub async fn update_order_status(
        &self,
        order_id: i32,
        actor_user_id: i32,
        status: &str,
    ) -> Result<OrderDetail, OrderServiceError> {
        let next: OrderStatus = status
            .parse()
            .map_err(|_| OrderServiceError::InvalidStatus(status.to_string()))?;

        let order = self.get_order_row(order_id).await?;
        self.authorize(&order, actor_user_id, false).await?;

        if next == OrderStatus::Cancelled {
            return self.cancel_unchecked(order_id, None).await;
        }

        let current = order.order_status();

        if current == next {
            return self.get_detail(order_id).await;
        }

        if !current.can_transition_to(next) {
            return Err(OrderServiceError::InvalidStatusTransition {
                from: current,
                to: next,
            });
        }

        let mut conn = self.db.get_connection().await?;
        let swapped = OrderRepo::swap_status(&mut conn, order_id, current, next).await?;

        if swapped == 0 {
            // Someone else moved the order between our read and the update.
            let latest = OrderRepo::find(&mut conn, order_id)
                .await?
                .ok_or(OrderServiceError::OrderNotFound)?;
            return Err(OrderServiceError::InvalidStatusTransition {
                from: latest.order_status(),
                to: next,
            });
        }

        tracing::info!("Order {} moved from {} to {}", order_id, current, next);

        OrderRepo::load_detail(&mut conn, order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    /// Visible to the buyer and to the owner of the selling business.
    pub async fn get_order(
        &self,
        order_id: i32,
        actor_user_id: i32,
    ) -> Result<OrderDetail, OrderServiceError> {
        let order = self.get_order_row(order_id).await?;
        self.authorize(&order, actor_user_id, true).await?;
        self.get_detail(order_id).await
    }

    pub async fn get_user_orders(&self, user_id: i32) -> Result<Vec<OrderDetail>, OrderServiceError> {
        Ok(OrderRepo::new(&self.db).list_for_user(user_id).await?)
    }

    pub async fn get_business_orders(
        &self,
        business_id: i32,
        actor_user_id: i32,
    ) -> Result<Vec<OrderDetail>, OrderServiceError> {
        match BusinessRepo::new(&self.db).get_owner_user_id(business_id).await? {
            None => Err(OrderServiceError::BusinessNotFound),
            Some(owner) if owner != actor_user_id => Err(OrderServiceError::PermissionDenied),
            Some(_) => Ok(OrderRepo::new(&self.db).list_for_business(business_id).await?),
        }
    }

    async fn cancel_unchecked(
        &self,
        order_id: i32,
        reason: Option<String>,
    ) -> Result<OrderDetail, OrderServiceError> {
        let mut conn = self.db.get_connection().await?;

        let restocked = conn
            .transaction::<_, OrderServiceError, _>(|conn| {
                async move {
                    acquire_write_lock(conn).await?;

                    let order = OrderRepo::find(conn, order_id)
                        .await?
                        .ok_or(OrderServiceError::OrderNotFound)?;

                    let flipped = OrderRepo::mark_cancelled(conn, order_id, reason.as_deref()).await?;

                    if flipped == 0 {
                        return match order.order_status() {
                            OrderStatus::Cancelled => Ok(false),
                            current => Err(OrderServiceError::InvalidStatusTransition {
                                from: current,
                                to: OrderStatus::Cancelled,
                            }),
                        };
                    }

                    for item in OrderRepo::items_of(conn, order_id).await? {
                        ProductRepo::restore_stock(conn, item.product_id, item.quantity).await?;
                    }

                    Ok(true)
                }
                .scope_boxed()
            })
            .await?;

        if restocked {
            tracing::info!("Order {} cancelled and stock restored", order_id);
        } else {
            tracing::info!("Order {} was already cancelled", order_id);
        }

        OrderRepo::load_detail(&mut conn, order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    async fn get_order_row(&self, order_id: i32) -> Result<Order, OrderServiceError> {
        OrderRepo::new(&self.db)
            .get_by_id(order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    async fn get_detail(&self, order_id: i32) -> Result<OrderDetail, OrderServiceError> {
        OrderRepo::new(&self.db)
            .get_detail(order_id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    /// The business owner always passes; the buyer only when `allow_buyer`.
    async fn authorize(
        &self,
        order: &Order,
        actor_user_id: i32,
        allow_buyer: bool,
    ) -> Result<(), OrderServiceError> {
        if allow_buyer && order.user_id == actor_user_id {
            return Ok(());
        }

        let owner = BusinessRepo::new(&self.db)
            .get_owner_user_id(order.business_id)
            .await?;

        if owner == Some(actor_user_id) {
            Ok(())
        } else {
            Err(OrderServiceError::PermissionDenied)
        }
    }
}
