use crate::data::database::{Database, DbConnection, last_insert_rowid};
use crate::data::models::business::{
    Business, BusinessFilter, BusinessSummary, NewBusiness, OwnerName, UpdateBusiness,
};
use crate::data::models::schema::{business_owners, businesses, products, reviews, users};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::collections::HashMap;

pub struct BusinessRepo {
    db: Database,
}

impl BusinessRepo {
    pub fn new(db: &Database) -> Self {
        BusinessRepo { db: db.clone() }
    }

    /// Active businesses matching the filter, newest first, with their
    /// listing counts attached.
    pub async fn list(&self, filter: &BusinessFilter) -> Result<Vec<BusinessSummary>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let mut query = businesses::table
            .inner_join(business_owners::table)
            .filter(businesses::is_active.eq(true))
            .select((Business::as_select(), business_owners::user_id))
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(businesses::category.eq(category.clone()));
        }

        if let Some(location) = &filter.location {
            query = query.filter(businesses::location.like(format!("%{}%", location)));
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                businesses::name
                    .like(pattern.clone())
                    .or(businesses::description.like(pattern.clone()).assume_not_null())
                    .or(businesses::category.like(pattern)),
            );
        }

        if let Some(owner) = filter.owner_id {
            query = query.filter(business_owners::user_id.eq(owner));
        }

        let rows: Vec<(Business, i32)> = query
            .order((businesses::created_at.desc(), businesses::id.desc()))
            .limit(filter.limit)
            .offset(filter.offset)
            .load(&mut conn)
            .await?;

        summarize(&mut conn, rows).await
    }

    pub async fn get_summary(&self, id: i32) -> Result<Option<BusinessSummary>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let row: Option<(Business, i32)> = businesses::table
            .inner_join(business_owners::table)
            .filter(businesses::id.eq(id))
            .filter(businesses::is_active.eq(true))
            .select((Business::as_select(), business_owners::user_id))
            .first(&mut conn)
            .await
            .optional()?;

        match row {
            Some(row) => Ok(summarize(&mut conn, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_owner_name(&self, id: i32) -> Result<Option<OwnerName>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        businesses::table
            .inner_join(business_owners::table.inner_join(users::table))
            .filter(businesses::id.eq(id))
            .select((users::username, users::first_name, users::last_name))
            .first::<OwnerName>(&mut conn)
            .await
            .optional()
    }

    /// User id of the account owning an active business.
    pub async fn get_owner_user_id(&self, id: i32) -> Result<Option<i32>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        businesses::table
            .inner_join(business_owners::table)
            .filter(businesses::id.eq(id))
            .filter(businesses::is_active.eq(true))
            .select(business_owners::user_id)
            .first(&mut conn)
            .await
            .optional()
    }
}

/// Attaches product and review aggregates to each business row.
async fn summarize(
    conn: &mut DbConnection,
    rows: Vec<(Business, i32)>,
) -> Result<Vec<BusinessSummary>, result::Error> {
    let ids: Vec<i32> = rows.iter().map(|(business, _)| business.id).collect();

    let product_counts: HashMap<i32, i64> = products::table
        .filter(products::business_id.eq_any(&ids))
        .filter(products::is_active.eq(true))
        .group_by(products::business_id)
        .select((products::business_id, count_star()))
        .load::<(i32, i64)>(conn)
        .await?
        .into_iter()
        .collect();

    // Averages are derived from the sum and count.
    let ratings: HashMap<i32, (i64, i64)> = reviews::table
        .filter(reviews::business_id.eq_any(&ids))
        .filter(reviews::is_active.eq(true))
        .group_by(reviews::business_id)
        .select((reviews::business_id, count_star(), sum(reviews::rating)))
        .load::<(i32, i64, Option<i64>)>(conn)
        .await?
        .into_iter()
        .map(|(business_id, count, total)| (business_id, (count, total.unwrap_or(0))))
        .collect();

    Ok(rows
        .into_iter()
        .map(|(business, owner_user_id)| {
            let (review_count, rating_sum) = ratings.get(&business.id).copied().unwrap_or((0, 0));
            let average_rating = if review_count > 0 {
                Some(rating_sum as f64 / review_count as f64)
            } else {
                None
            };

            BusinessSummary {
                product_count: product_counts.get(&business.id).copied().unwrap_or(0),
                review_count,
                average_rating,
                owner_user_id,
                business,
            }
        })
        .collect())
}

#[async_trait]
impl Repository for BusinessRepo {
    type Id = i32;
    type Item = Business;
    type NewItem<'a> = NewBusiness<'a>;
    type UpdateForm<'a> = UpdateBusiness<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        match businesses::table
            .filter(businesses::is_active.eq(true))
            .select(Business::as_select())
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

        businesses::table
            .find(id)
            .filter(businesses::is_active.eq(true))
            .select(Business::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<Self::Item, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::insert_into(businesses::table)
            .values(&item)
            .execute(&mut conn)
            .await?;

        let new_id = last_insert_rowid(&mut conn).await?;

        businesses::table
            .find(new_id)
            .select(Business::as_select())
            .first(&mut conn)
            .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<usize, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::update(businesses::table.find(id))
            .set(&item)
            .execute(&mut conn)
            .await
    }

    async fn delete(&self, id: Self::Id) -> Result<usize, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::update(businesses::table.find(id))
            .set(businesses::is_active.eq(false))
            .execute(&mut conn)
            .await
    }
}
