use crate::data::database::Database;
use crate::data::models::business_owner::{BusinessOwner, NewBusinessOwner};
use crate::data::models::user::AccountType;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct BusinessOwnerRepo {
    db: Database,
}

impl BusinessOwnerRepo {
    pub fn new(db: &Database) -> Self {
        BusinessOwnerRepo { db: db.clone() }
    }

    pub async fn get_by_user_id(&self, user: i32) -> Result<Option<BusinessOwner>, result::Error> {
        use crate::data::models::schema::business_owners::dsl::{business_owners, user_id};

        let mut conn = self.db.get_connection().await?;

        business_owners
            .filter(user_id.eq(user))
            .select(BusinessOwner::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    /// Turns an existing user into a business owner: inserts the owner record
    /// and flips `users.account_type` together.
    pub async fn upgrade_user(
        &self,
        new_owner: NewBusinessOwner<'_>,
    ) -> Result<BusinessOwner, result::Error> {
        use crate::data::models::schema::business_owners::dsl::{business_owners, user_id};
        use crate::data::models::schema::users::dsl::{account_type, users};

        let mut conn = self.db.get_connection().await?;

        conn.transaction::<_, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(business_owners)
                    .values(&new_owner)
                    .execute(connection)
                    .await?;

                diesel::update(users.find(new_owner.user_id))
                    .set(account_type.eq(AccountType::BusinessOwner.as_str()))
                    .execute(connection)
                    .await?;

                business_owners
                    .filter(user_id.eq(new_owner.user_id))
                    .select(BusinessOwner::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }
}
