use crate::data::database::Database;
use crate::data::models::business_owner::{BusinessOwner, NewBusinessOwner};
use crate::data::models::user::{AccountType, NewUser, UpdateUser, User};
use crate::data::repos::implementors::business_owner_repo::BusinessOwnerRepo;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::auth::AuthService;
use crate::security::errors::AuthError;
use crate::services::errors::UserServiceError;
use crate::utils::validation::{self, Registration};
use diesel::result::{self, DatabaseErrorKind};

pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: &Database) -> Self {
        UserService { db: db.clone() }
    }

    /// Validates the form, rejects duplicates, hashes the password and stores
    /// the user (plus the owner record for business-owner sign-ups).
    pub async fn register(
        &self,
        form: &Registration,
        account_type: AccountType,
    ) -> Result<User, UserServiceError> {
        let errors = validation::check(form);
        if !errors.is_empty() {
            return Err(UserServiceError::Validation(errors));
        }

        let repo = UserRepo::new(&self.db);

        if repo
            .exists_with_identity(form.username.trim(), form.email.trim(), form.index_number.trim())
            .await?
        {
            return Err(UserServiceError::AlreadyExists);
        }

        let password_hash = AuthService::new().hash_password(&form.password).await?;

        let new_user = NewUser {
            username: form.username.trim(),
            email: form.email.trim(),
            password_hash: &password_hash,
            first_name: form.first_name.trim(),
            last_name: form.last_name.trim(),
            index_number: form.index_number.trim(),
            hall_of_residence: form.hall_of_residence.trim(),
            department: form.department.trim(),
            phone_number: form.phone_number.trim(),
            account_type: account_type.as_str(),
        };

        let user = repo
            .register(new_user, account_type == AccountType::BusinessOwner)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent sign-up for the same identity.
                result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    UserServiceError::AlreadyExists
                }
                other => UserServiceError::DatabaseError(other),
            })?;

        tracing::info!("User {} registered as {}", user.id, user.account_type);

        Ok(user)
    }

    /// `identifier` may be the username or the email address.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, UserServiceError> {
        let user = UserRepo::new(&self.db)
            .get_by_login(identifier.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !AuthService::new()
            .verify_password(password, &user.password_hash)
            .await?
        {
            tracing::warn!("Failed login for user {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<User, UserServiceError> {
        UserRepo::new(&self.db)
            .get_by_id(id)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserServiceError> {
        Ok(UserRepo::new(&self.db).list(limit, offset).await?)
    }

    pub async fn update_profile(
        &self,
        target_id: i32,
        actor_id: i32,
        changes: UpdateUser<'_>,
    ) -> Result<User, UserServiceError> {
        if target_id != actor_id {
            return Err(UserServiceError::PermissionDenied);
        }

        if changes.is_empty() {
            return Err(UserServiceError::EmptyUpdate);
        }

        let touched = UserRepo::new(&self.db).update(target_id, changes).await?;
        if touched == 0 {
            return Err(UserServiceError::UserNotFound);
        }

        self.get_user(target_id).await
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UserServiceError> {
        if validation::password_rule(new_password).is_err() {
            return Err(UserServiceError::Validation(vec![
                "New password must be at least 6 characters long and contain at least one letter and one number"
                    .to_string(),
            ]));
        }

        let user = self.get_user(user_id).await?;
        let auth = AuthService::new();

        if !auth.verify_password(current_password, &user.password_hash).await? {
            return Err(UserServiceError::WrongPassword);
        }

        let password_hash = auth.hash_password(new_password).await?;

        UserRepo::new(&self.db)
            .update(
                user_id,
                UpdateUser {
                    password_hash: Some(&password_hash),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!("Password changed for user {}", user_id);

        Ok(())
    }

    pub async fn deactivate(&self, target_id: i32, actor_id: i32) -> Result<(), UserServiceError> {
        if target_id != actor_id {
            return Err(UserServiceError::PermissionDenied);
        }

        let touched = UserRepo::new(&self.db).delete(target_id).await?;
        if touched == 0 {
            return Err(UserServiceError::UserNotFound);
        }

        tracing::info!("User {} deactivated", target_id);

        Ok(())
    }

    pub async fn become_business_owner(
        &self,
        user_id: i32,
        business_license_number: Option<&str>,
    ) -> Result<BusinessOwner, UserServiceError> {
        self.get_user(user_id).await?;

        let repo = BusinessOwnerRepo::new(&self.db);

        if repo.get_by_user_id(user_id).await?.is_some() {
            return Err(UserServiceError::AlreadyBusinessOwner);
        }

        let owner = repo
            .upgrade_user(NewBusinessOwner {
                user_id,
                business_license_number,
                verification_documents: None,
            })
            .await?;

        tracing::info!("User {} is now a business owner", user_id);

        Ok(owner)
    }
}
