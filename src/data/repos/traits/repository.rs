use async_trait::async_trait;
use diesel::result;

/// Common CRUD surface shared by the entity repositories.
///
/// `get_all` returns `Ok(None)` for an empty table rather than an empty vec,
/// and `delete` is a soft delete for every entity that carries `is_active`.
#[async_trait]
pub trait Repository {
    type Id: Send + Copy + 'static;
    type Item: Send;
    type NewItem<'a>: Send;
    type UpdateForm<'a>: Send;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error>;

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error>;

    /// Inserts the row and returns it as stored.
    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<Self::Item, result::Error>;

    /// Returns the number of rows touched.
    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<usize, result::Error>;

    async fn delete(&self, id: Self::Id) -> Result<usize, result::Error>;
}
