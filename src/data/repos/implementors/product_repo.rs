use crate::data::database::{Database, DbConnection, last_insert_rowid};
use crate::data::models::product::{
    NewProduct, Product, ProductFilter, ProductListing, UpdateProduct,
};
use crate::data::models::schema::{business_owners, businesses, products};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;

pub struct ProductRepo {
    db: Database,
}

impl ProductRepo {
    pub fn new(db: &Database) -> Self {
        ProductRepo { db: db.clone() }
    }

    /// Active products of active businesses matching the filter, newest first.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<ProductListing>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let mut query = products::table
            .inner_join(businesses::table)
            .filter(products::is_active.eq(true))
            .filter(businesses::is_active.eq(true))
            .select((
                Product::as_select(),
                businesses::name,
                businesses::location,
            ))
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(products::category.eq(category.clone()));
        }

        if let Some(business) = filter.business_id {
            query = query.filter(products::business_id.eq(business));
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern.clone()).assume_not_null())
                    .or(products::category.like(pattern)),
            );
        }

        let rows: Vec<(Product, String, String)> = query
            .order((products::created_at.desc(), products::id.desc()))
            .limit(filter.limit)
            .offset(filter.offset)
            .load(&mut conn)
            .await?;

        Ok(rows.into_iter().map(into_listing).collect())
    }

    pub async fn get_listing(&self, id: i32) -> Result<Option<ProductListing>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        let row: Option<(Product, String, String)> = products::table
            .inner_join(businesses::table)
            .filter(products::id.eq(id))
            .filter(products::is_active.eq(true))
            .filter(businesses::is_active.eq(true))
            .select((
                Product::as_select(),
                businesses::name,
                businesses::location,
            ))
            .first(&mut conn)
            .await
            .optional()?;

        Ok(row.map(into_listing))
    }

    /// User id of the account owning the business that sells an active product.
    pub async fn get_owner_user_id(&self, id: i32) -> Result<Option<i32>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        products::table
            .inner_join(businesses::table.inner_join(business_owners::table))
            .filter(products::id.eq(id))
            .filter(products::is_active.eq(true))
            .filter(businesses::is_active.eq(true))
            .select(business_owners::user_id)
            .first(&mut conn)
            .await
            .optional()
    }

    /// Loads the given products on an already checked-out connection, so the
    /// read shares the caller's transaction.
    pub async fn load_many(
        conn: &mut DbConnection,
        ids: &[i32],
    ) -> Result<Vec<Product>, result::Error> {
        products::table
            .filter(products::id.eq_any(ids))
            .select(Product::as_select())
            .load(conn)
            .await
    }

    /// Takes `quantity` units out of stock only while enough remain and the
    /// product is still on sale. Returns the number of rows touched, so zero
    /// means the guard refused.
    pub async fn take_stock(
        conn: &mut DbConnection,
        id: i32,
        quantity: i32,
    ) -> Result<usize, result::Error> {
        diesel::update(
            products::table
                .filter(products::id.eq(id))
                .filter(products::stock_quantity.ge(quantity))
                .filter(products::is_available.eq(true))
                .filter(products::is_active.eq(true)),
        )
        .set(products::stock_quantity.eq(products::stock_quantity - quantity))
        .execute(conn)
        .await
    }

    pub async fn restore_stock(
        conn: &mut DbConnection,
        id: i32,
        quantity: i32,
    ) -> Result<usize, result::Error> {
        diesel::update(products::table.filter(products::id.eq(id)))
            .set(products::stock_quantity.eq(products::stock_quantity + quantity))
            .execute(conn)
            .await
    }
}

fn into_listing((product, business_name, business_location): (Product, String, String)) -> ProductListing {
    ProductListing {
        product,
        business_name,
        business_location,
    }
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = i32;
    type Item = Product;
    type NewItem<'a> = NewProduct<'a>;
    type UpdateForm<'a> = UpdateProduct<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        match products::table
            .filter(products::is_active.eq(true))
            .select(Product::as_select())
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

        products::table
            .find(id)
            .filter(products::is_active.eq(true))
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<Self::Item, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::insert_into(products::table)
            .values(&item)
            .execute(&mut conn)
            .await?;

        let new_id = last_insert_rowid(&mut conn).await?;

        products::table
            .find(new_id)
            .select(Product::as_select())
            .first(&mut conn)
            .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<usize, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::update(products::table.find(id))
            .set(&item)
            .execute(&mut conn)
            .await
    }

    async fn delete(&self, id: Self::Id) -> Result<usize, result::Error> {
        let mut conn = self.db.get_connection().await?;

        diesel::update(products::table.find(id))
            .set(products::is_active.eq(false))
            .execute(&mut conn)
            .await
    }
}
