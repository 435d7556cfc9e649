use crate::data::database::Database;
use crate::data::repos::implementors::business_repo::BusinessRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::security::errors::AuthError;

/// Resources whose mutations are restricted to the owning business owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Business,
    Product,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Business => "Business",
            ResourceKind::Product => "Product",
        }
    }
}

/// Resolves the user owning `id` and checks it is `user_id`.
pub async fn authorize_owner(
    db: &Database,
    kind: ResourceKind,
    id: i32,
    user_id: i32,
) -> Result<(), AuthError> {
    let owner = match kind {
        ResourceKind::Business => BusinessRepo::new(db).get_owner_user_id(id).await?,
        ResourceKind::Product => ProductRepo::new(db).get_owner_user_id(id).await?,
    };

    match owner {
        None => Err(AuthError::ResourceNotFound(kind.label())),
        Some(owner_id) if owner_id != user_id => {
            tracing::warn!("User {} denied access to {} {}", user_id, kind.label(), id);
            Err(AuthError::NotOwner)
        }
        Some(_) => Ok(()),
    }
}
