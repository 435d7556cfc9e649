use crate::data::database::Database;
use crate::data::models::category::Category;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

/// Categories are seeded with the schema and read-only over HTTP.
pub struct CategoryRepo {
    db: Database,
}

impl CategoryRepo {
    pub fn new(db: &Database) -> Self {
        CategoryRepo { db: db.clone() }
    }

    pub async fn get_all(&self) -> Result<Vec<Category>, result::Error> {
        use crate::data::models::schema::categories::dsl::{categories, name};

        let mut conn = self.db.get_connection().await?;

        categories
            .order(name.asc())
            .select(Category::as_select())
            .load(&mut conn)
            .await
    }
}
