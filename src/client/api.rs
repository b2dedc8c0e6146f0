use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use super::config::ApiConfig;
use crate::{
    dto::favorites::{AddFavoriteRequest, FavoritesResponse},
    models::Product,
    response::MessageBody,
};

/// Who is signed in on the client. Passed to every call instead of being
/// read from ambient storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no active session")]
    NoSession,

    #[error("a favorite change is already in flight")]
    Busy,

    #[error("request cancelled")]
    Cancelled,

    #[error("server answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait FavoritesApi: Send + Sync {
    async fn list(&self, session: &Session) -> Result<Vec<Product>, ClientError>;
    async fn add(&self, session: &Session, product_id: &str) -> Result<FavoritesResponse, ClientError>;
    async fn remove(&self, session: &Session, product_id: &str)
    -> Result<FavoritesResponse, ClientError>;
}

/// `FavoritesApi` over HTTP against the users routes.
#[derive(Debug, Clone)]
pub struct HttpFavoritesApi {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpFavoritesApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn read<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        Err(api_error(status, response).await)
    }
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> ClientError {
    let message = match response.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl FavoritesApi for HttpFavoritesApi {
    async fn list(&self, session: &Session) -> Result<Vec<Product>, ClientError> {
        let response = self
            .http
            .get(self.config.favorites_url(&session.user_id))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn add(&self, session: &Session, product_id: &str) -> Result<FavoritesResponse, ClientError> {
        let body = AddFavoriteRequest {
            product_id: Some(product_id.to_string()),
        };
        let response = self
            .http
            .post(self.config.favorites_url(&session.user_id))
            .bearer_auth(&session.token)
            .json(&body)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn remove(
        &self,
        session: &Session,
        product_id: &str,
    ) -> Result<FavoritesResponse, ClientError> {
        let response = self
            .http
            .delete(self.config.favorite_url(&session.user_id, product_id))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::read(response).await
    }
}
