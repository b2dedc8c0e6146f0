#![allow(dead_code)]

use chrono::{TimeDelta, Utc};
use donar_api::{
    db::{create_orm_conn, sync_schema},
    dto::auth::{AuthResponse, RegisterRequest},
    entity::{donations, products},
    services::{token_service::TokenKeys, user_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

pub const SECRET: &str = "test-secret";

/// Fresh in-memory database with the schema in place.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    sync_schema(&orm).await?;
    Ok(AppState::new(orm, TokenKeys::new(SECRET, TimeDelta::hours(24))))
}

pub fn registration(id: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        id: Some(id.to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        nombre: Some("Ana".into()),
        ..RegisterRequest::default()
    }
}

pub async fn register(state: &AppState, id: &str, email: &str) -> anyhow::Result<AuthResponse> {
    Ok(user_service::register_user(state, registration(id, email, "secreto123")).await?)
}

pub async fn create_product(
    state: &AppState,
    owner: Uuid,
    title: &str,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        object_id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(Some(format!("{title} en buen estado"))),
        categoria: Set(Some("Hogar".into())),
        image: Set(None),
        images: Set(serde_json::json!(["foto.jpg"])),
        provincia: Set(Some("Córdoba".into())),
        owner_id: Set(owner),
        condicion: Set(Some("usado".into())),
        valor_estimado: Set(Some(1500)),
        disponible: Set(true),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

pub async fn create_donation(
    state: &AppState,
    donor: Uuid,
    product: Option<Uuid>,
    status: &str,
) -> anyhow::Result<donations::Model> {
    let donation = donations::ActiveModel {
        object_id: Set(Uuid::new_v4()),
        donor_id: Set(donor),
        product_id: Set(product),
        status: Set(status.to_string()),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;
    Ok(donation)
}
