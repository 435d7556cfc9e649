use crate::data::database::Database;
use crate::data::models::review::{NewReview, Review};
use crate::data::repos::implementors::business_repo::BusinessRepo;
use crate::data::repos::implementors::review_repo::ReviewRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::ReviewServiceError;

pub struct ReviewService {
    db: Database,
}

impl ReviewService {
    pub fn new(db: &Database) -> Self {
        ReviewService { db: db.clone() }
    }

    /// Reviews with the author's username, newest first.
    pub async fn list_for_business(
        &self,
        business_id: i32,
    ) -> Result<Vec<(Review, String)>, ReviewServiceError> {
        self.ensure_business(business_id).await?;
        Ok(ReviewRepo::new(&self.db).list_for_business(business_id).await?)
    }

    pub async fn add_review(&self, review: NewReview<'_>) -> Result<Review, ReviewServiceError> {
        self.ensure_business(review.business_id).await?;

        let created = ReviewRepo::new(&self.db).add(review).await?;

        tracing::info!("Review {} added to business {}", created.id, created.business_id);

        Ok(created)
    }

    pub async fn delete_review(&self, id: i32, user_id: i32) -> Result<(), ReviewServiceError> {
        let repo = ReviewRepo::new(&self.db);

        let review = repo
            .get_by_id(id)
            .await?
            .ok_or(ReviewServiceError::ReviewNotFound)?;

        if review.user_id != user_id {
            return Err(ReviewServiceError::PermissionDenied);
        }

        repo.delete(id).await?;

        Ok(())
    }

    async fn ensure_business(&self, business_id: i32) -> Result<(), ReviewServiceError> {
        match BusinessRepo::new(&self.db).get_by_id(business_id).await? {
            Some(_) => Ok(()),
            None => Err(ReviewServiceError::BusinessNotFound),
        }
    }
}
