use crate::data::database::Database;
use crate::data::models::business::{
    BusinessDetail, BusinessFilter, BusinessSummary, NewBusiness, UpdateBusiness,
};
use crate::data::repos::implementors::business_owner_repo::BusinessOwnerRepo;
use crate::data::repos::implementors::business_repo::BusinessRepo;
use crate::data::repos::implementors::review_repo::ReviewRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::ownership::{ResourceKind, authorize_owner};
use crate::services::errors::BusinessServiceError;

const RECENT_REVIEWS: i64 = 10;

pub struct BusinessService {
    db: Database,
}

impl BusinessService {
    pub fn new(db: &Database) -> Self {
        BusinessService { db: db.clone() }
    }

    pub async fn list_businesses(
        &self,
        filter: &BusinessFilter,
    ) -> Result<Vec<BusinessSummary>, BusinessServiceError> {
        Ok(BusinessRepo::new(&self.db).list(filter).await?)
    }

    pub async fn get_business(&self, id: i32) -> Result<BusinessSummary, BusinessServiceError> {
        BusinessRepo::new(&self.db)
            .get_summary(id)
            .await?
            .ok_or(BusinessServiceError::BusinessNotFound)
    }

    /// Summary plus the owner's name and the latest reviews.
    pub async fn get_business_detail(&self, id: i32) -> Result<BusinessDetail, BusinessServiceError> {
        let summary = self.get_business(id).await?;

        let owner = BusinessRepo::new(&self.db)
            .get_owner_name(id)
            .await?
            .ok_or(BusinessServiceError::BusinessNotFound)?;

        let recent_reviews = ReviewRepo::new(&self.db)
            .recent_for_business(id, RECENT_REVIEWS)
            .await?;

        Ok(BusinessDetail {
            summary,
            owner,
            recent_reviews,
        })
    }

    /// Creates a business for the caller's owner record. `owner_id` on the
    /// incoming row is replaced with that record's id.
    pub async fn create_business(
        &self,
        user_id: i32,
        mut business: NewBusiness<'_>,
    ) -> Result<BusinessSummary, BusinessServiceError> {
        let owner = BusinessOwnerRepo::new(&self.db)
            .get_by_user_id(user_id)
            .await?
            .ok_or(BusinessServiceError::NotBusinessOwner)?;

        business.owner_id = owner.id;

        let created = BusinessRepo::new(&self.db).add(business).await?;

        tracing::info!("Business {} created by user {}", created.id, user_id);

        self.get_business(created.id).await
    }

    pub async fn update_business(
        &self,
        id: i32,
        user_id: i32,
        changes: UpdateBusiness<'_>,
    ) -> Result<BusinessSummary, BusinessServiceError> {
        if changes.is_empty() {
            return Err(BusinessServiceError::EmptyUpdate);
        }

        authorize_owner(&self.db, ResourceKind::Business, id, user_id).await?;

        BusinessRepo::new(&self.db).update(id, changes).await?;

        self.get_business(id).await
    }

    pub async fn delete_business(&self, id: i32, user_id: i32) -> Result<(), BusinessServiceError> {
        authorize_owner(&self.db, ResourceKind::Business, id, user_id).await?;

        BusinessRepo::new(&self.db).delete(id).await?;

        tracing::info!("Business {} deactivated by user {}", id, user_id);

        Ok(())
    }
}
