use crate::data::database::Database;
use crate::data::models::product::{NewProduct, ProductFilter, ProductListing, UpdateProduct};
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::ownership::{ResourceKind, authorize_owner};
use crate::services::errors::ProductServiceError;

pub struct ProductService {
    db: Database,
}

impl ProductService {
    pub fn new(db: &Database) -> Self {
        ProductService { db: db.clone() }
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductListing>, ProductServiceError> {
        Ok(ProductRepo::new(&self.db).list(filter).await?)
    }

    pub async fn get_product(&self, id: i32) -> Result<ProductListing, ProductServiceError> {
        ProductRepo::new(&self.db)
            .get_listing(id)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)
    }

    /// Only the owner of `product.business_id` may add to its catalogue.
    pub async fn create_product(
        &self,
        user_id: i32,
        product: NewProduct<'_>,
    ) -> Result<ProductListing, ProductServiceError> {
        authorize_owner(&self.db, ResourceKind::Business, product.business_id, user_id).await?;

        let created = ProductRepo::new(&self.db).add(product).await?;

        tracing::info!("Product {} created by user {}", created.id, user_id);

        self.get_product(created.id).await
    }

    pub async fn update_product(
        &self,
        id: i32,
        user_id: i32,
        changes: UpdateProduct<'_>,
    ) -> Result<ProductListing, ProductServiceError> {
        if changes.is_empty() {
            return Err(ProductServiceError::EmptyUpdate);
        }

        authorize_owner(&self.db, ResourceKind::Product, id, user_id).await?;

        ProductRepo::new(&self.db).update(id, changes).await?;

        self.get_product(id).await
    }

    pub async fn delete_product(&self, id: i32, user_id: i32) -> Result<(), ProductServiceError> {
        authorize_owner(&self.db, ResourceKind::Product, id, user_id).await?;

        ProductRepo::new(&self.db).delete(id).await?;

        tracing::info!("Product {} deactivated by user {}", id, user_id);

        Ok(())
    }
}
