use crate::data::database::{Database, last_insert_rowid};
use crate::data::models::review::{NewReview, Review, UpdateReview};
use crate::data::models::schema::{reviews, users};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct ReviewRepo {
    db: Database,
}

impl ReviewRepo {
    pub fn new(db: &Database) -> Self {
        ReviewRepo { db: db.clone() }
    }

    /// Active reviews for a business, newest first, with the author's username.
    pub async fn list_for_business(
        &self,
        business: i32,
    ) -> Result<Vec<(Review, String)>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        reviews::table
            .inner_join(users::table)
            .filter(reviews::business_id.eq(business))
            .filter(reviews::is_active.eq(true))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .select((Review::as_select(), users::username))
            .load(&mut conn)
            .await
    }

    pub async fn recent_for_business(
        &self,
        business: i32,
        limit: i64,
    ) -> Result<Vec<(Review, String)>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        reviews::table
            .inner_join(users::table)
            .filter(reviews::business_id.eq(business))
            .filter(reviews::is_active.eq(true))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .limit(limit)
            .select((Review::as_select(), users::username))
            .load(&mut conn)
            .await
    }
}

#[async_trait]
impl Repository for ReviewRepo {
    type Id = i32;
    type Item = Review;
    type NewItem<'a> = NewReview<'a>;
    type UpdateForm<'a> = UpdateReview<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        match reviews::table
            .filter(reviews::is_active.eq(true))
            .select(Review::as_select())
            .load(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        reviews::table
            .find(id)
            .filter(reviews::is_active.eq(true))
            .select(Review::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<Self::Item, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::insert_into(reviews::table)
            .values(&item)
            .execute(&mut conn)
            .await?;

        let new_id = last_insert_rowid(&mut conn).await?;

        reviews::table
            .find(new_id)
            .select(Review::as_select())
            .first(&mut conn)
            .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<usize, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::update(reviews::table.find(id))
            .set(&item)
            .execute(&mut conn)
            .await
    }

    async fn delete(&self, id: Self::Id) -> Result<usize, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::update(reviews::table.find(id))
            .set(reviews::is_active.eq(false))
            .execute(&mut conn)
            .await
    }
}
