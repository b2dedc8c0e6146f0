use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RegisterRequest {
    /// Application identity chosen by the client; generated when absent.
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub imagen: Option<String>,
    /// When present, fills both `zona` and `ubicacion`.
    pub provincia: Option<String>,
    pub zona: Option<String>,
    pub ubicacion: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}
