use crate::data::database::{Database, last_insert_rowid};
use crate::data::models::business_owner::NewBusinessOwner;
use crate::data::models::user::{NewUser, UpdateUser, User};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct UserRepo {
    db: Database,
}

impl UserRepo {
    pub fn new(db: &Database) -> Self {
        UserRepo { db: db.clone() }
    }

    pub async fn get_by_username(&self, username_query: &str) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{is_active, username, users};

        let mut conn = self.db.get_connection().await?;

        users
            .filter(username.eq(username_query))
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// Login accepts either the username or the email address.
    pub async fn get_by_login(&self, identifier: &str) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{email, is_active, username, users};

        let mut conn = self.db.get_connection().await?;

        users
            .filter(username.eq(identifier).or(email.eq(identifier)))
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// True when any row, active or not, already holds one of the unique fields.
    pub async fn exists_with_identity(
        &self,
        username_query: &str,
        email_query: &str,
        index_query: &str,
    ) -> Result<bool, result::Error> {
        use crate::data::models::schema::users::dsl::{email, id, index_number, username, users};

        let mut conn = self.db.get_connection().await?;

        let found: Option<i32> = users
            .filter(
                username
                    .eq(username_query)
                    .or(email.eq(email_query))
                    .or(index_number.eq(index_query)),
            )
            .select(id)
            .first(&mut conn)
            .await
            .optional()?;

        Ok(found.is_some())
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{created_at, id, is_active, users};

        let mut conn = self.db.get_connection().await?;

        users
            .filter(is_active.eq(true))
            .order((created_at.desc(), id.desc()))
            .limit(limit)
            .offset(offset)
            .select(User::as_select())
            .load(&mut conn)
            .await
    }

    /// Inserts the user and, for business-owner sign-ups, the owner record in
    /// the same transaction.
    pub async fn register(
        &self,
        new_user: NewUser<'_>,
        as_business_owner: bool,
    ) -> Result<User, result::Error> {
        use crate::data::models::schema::business_owners::dsl::business_owners;
        use crate::data::models::schema::users::dsl::users;

        let mut conn = self.db.get_connection().await?;

        conn.transaction::<_, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(users)
                    .values(&new_user)
                    .execute(connection)
                    .await?;

                let new_id = last_insert_rowid(connection).await?;

                if as_business_owner {
                    let owner = NewBusinessOwner {
                        user_id: new_id,
                        business_license_number: None,
                        verification_documents: None,
                    };
                    diesel::insert_into(business_owners)
                        .values(&owner)
                        .execute(connection)
                        .await?;
                }

                users
                    .find(new_id)
                    .select(User::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }
}

#[async_trait]
impl Repository for UserRepo {
    type Id = i32;
    type Item = User;
    type NewItem<'a> = NewUser<'a>;
    type UpdateForm<'a> = UpdateUser<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::users::dsl::{is_active, users};

        let mut conn = self.db.get_connection().await?;

        match users
            .filter(is_active.eq(true))
            .select(User::as_select())
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
        use crate::data::models::schema::users::dsl::{is_active, users};

        let mut conn = self.db.get_connection().await?;

        users
            .find(id)
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<Self::Item, result::Error> {
        self.register(item, false).await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<usize, result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let mut conn = self.db.get_connection().await?;

        diesel::update(users.find(id))
            .set(&item)
            .execute(&mut conn)
            .await
    }

    async fn delete(&self, id: Self::Id) -> Result<usize, result::Error> {
        use crate::data::models::schema::users::dsl::{is_active, users};

        let mut conn = self.db.get_connection().await?;

        diesel::update(users.find(id))
            .set(is_active.eq(false))
            .execute(&mut conn)
            .await
    }
}
