use crate::api::config::Config;
use crate::data::database::Database;
use crate::security::jwt::JwtService;
use std::sync::Arc;

/// Shared by every handler through `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let jwt = JwtService::new(&config);

        AppState {
            db,
            config: Arc::new(config),
            jwt,
        }
    }
}
