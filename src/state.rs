use std::sync::Arc;

use crate::{db::OrmConn, services::token_service::TokenKeys};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(orm: OrmConn, tokens: TokenKeys) -> Self {
        Self {
            orm,
            tokens: Arc::new(tokens),
        }
    }
}
