use std::collections::HashMap;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        users::{DeleteUserResponse, UpdateUserRequest},
    },
    entity::{Donations, Favorites, Users, donations, favorites, users},
    error::{AppError, AppResult},
    models::{User, UserProfile, transactions_to_json},
    services::user_deletion_service::delete_user_cascade,
    state::AppState,
};

const EMAIL_TAKEN: &str = "El email ya está registrado";
const ID_TAKEN: &str = "El id ya está registrado";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Looks a user up by application identity.
pub async fn find_by_app_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> AppResult<Option<users::Model>> {
    Ok(Users::find()
        .filter(users::Column::Id.eq(id))
        .one(conn)
        .await?)
}

pub async fn require_by_app_id<C: ConnectionTrait>(conn: &C, id: &str) -> AppResult<users::Model> {
    find_by_app_id(conn, id)
        .await?
        .ok_or_else(AppError::user_not_found)
}

/// Application identity first, then storage identity when the path parses
/// as one.
pub async fn find_by_any_id(orm: &OrmConn, id: &str) -> AppResult<Option<users::Model>> {
    if let Some(user) = find_by_app_id(orm, id).await? {
        return Ok(Some(user));
    }
    match Uuid::parse_str(id) {
        Ok(object_id) => Ok(Users::find_by_id(object_id).one(orm).await?),
        Err(_) => Ok(None),
    }
}

/// Favorite product ids per user, in the order they were added.
pub async fn favorite_ids<C: ConnectionTrait>(
    conn: &C,
    user_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<Uuid>>> {
    let rows = Favorites::find()
        .filter(favorites::Column::UserId.is_in(user_ids.to_vec()))
        .order_by_asc(favorites::Column::AddedAt)
        .order_by_asc(favorites::Column::ProductId)
        .all(conn)
        .await?;

    let mut by_user: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in rows {
        by_user.entry(row.user_id).or_default().push(row.product_id);
    }
    Ok(by_user)
}

async fn to_document<C: ConnectionTrait>(conn: &C, model: users::Model) -> AppResult<User> {
    let mut favs = favorite_ids(conn, &[model.object_id]).await?;
    let ids = favs.remove(&model.object_id).unwrap_or_default();
    Ok(User::from_model(model, ids))
}

pub async fn list_users(state: &AppState) -> AppResult<Vec<User>> {
    let models = Users::find()
        .order_by_asc(users::Column::CreatedAt)
        .all(&state.orm)
        .await?;
    let ids: Vec<Uuid> = models.iter().map(|m| m.object_id).collect();
    let mut favs = favorite_ids(&state.orm, &ids).await?;

    Ok(models
        .into_iter()
        .map(|m| {
            let ids = favs.remove(&m.object_id).unwrap_or_default();
            User::from_model(m, ids)
        })
        .collect())
}

pub async fn get_user(state: &AppState, id: &str) -> AppResult<UserProfile> {
    let model = find_by_any_id(&state.orm, id)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    let donaciones_count = Donations::find()
        .filter(donations::Column::DonorId.eq(model.object_id))
        .filter(donations::Column::Status.eq(donations::STATUS_DELIVERED))
        .count(&state.orm)
        .await?;

    let user = to_document(&state.orm, model)
        .await?
        .without_deleted_transactions();
    Ok(UserProfile {
        user,
        donaciones_count,
    })
}

fn required(field: Option<String>, name: &str) -> AppResult<String> {
    match field.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("El campo {name} es obligatorio"))),
    }
}

/// Emails are matched trimmed on every path that stores or looks one up.
fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Tells the two unique indexes on users apart when an insert races a
/// concurrent registration.
fn registration_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            AppError::BadRequest(EMAIL_TAKEN.into())
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::BadRequest(ID_TAKEN.into()),
        _ => AppError::OrmError(err),
    }
}

pub async fn register_user(state: &AppState, payload: RegisterRequest) -> AppResult<AuthResponse> {
    let email = normalize_email(&required(payload.email, "email")?);
    let password = required(payload.password, "password")?;

    let exist = Users::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest(EMAIL_TAKEN.into()));
    }

    let app_id = match payload.id.map(|id| id.trim().to_string()) {
        Some(id) if !id.is_empty() => {
            if find_by_app_id(&state.orm, &id).await?.is_some() {
                return Err(AppError::BadRequest(ID_TAKEN.into()));
            }
            id
        }
        _ => Uuid::new_v4().to_string(),
    };
    let zona = payload.provincia.clone().or(payload.zona);
    let ubicacion = payload.provincia.or(payload.ubicacion);
    let now = Utc::now().fixed_offset();

    let model = users::ActiveModel {
        object_id: Set(Uuid::new_v4()),
        id: Set(app_id),
        email: Set(email),
        username: Set(payload.username),
        nombre: Set(payload.nombre),
        apellido: Set(payload.apellido),
        imagen: Set(payload.imagen),
        zona: Set(zona),
        ubicacion: Set(ubicacion),
        telefono: Set(None),
        mostrar_contacto: Set(false),
        password_hash: Set(hash_password(&password)?),
        transacciones: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(registration_conflict)?;

    let token = state.tokens.issue(&model.id, &model.email)?;
    tracing::info!(user_id = %model.id, "user registered");

    Ok(AuthResponse {
        user: User::from_model(model, Vec::new()),
        token,
    })
}

pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<AuthResponse> {
    let LoginRequest { email, password } = payload;
    let email = normalize_email(&email);
    let model = Users::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    if !verify_password(&password, &model.password_hash)? {
        tracing::warn!(user_id = %model.id, "login with wrong password");
        return Err(AppError::Unauthorized("Contraseña incorrecta".into()));
    }

    let token = state.tokens.issue(&model.id, &model.email)?;
    let user = to_document(&state.orm, model).await?;
    Ok(AuthResponse { user, token })
}

pub async fn update_user(
    state: &AppState,
    id: &str,
    payload: UpdateUserRequest,
) -> AppResult<User> {
    let existing = require_by_app_id(&state.orm, id).await?;
    let mut active: users::ActiveModel = existing.into();

    if let Some(nombre) = payload.nombre {
        tracing::debug!(user_id = %id, field = "nombre", "updating field");
        active.nombre = Set(Some(nombre));
    }
    if let Some(apellido) = payload.apellido {
        tracing::debug!(user_id = %id, field = "apellido", "updating field");
        active.apellido = Set(Some(apellido));
    }
    if let Some(username) = payload.username {
        tracing::debug!(user_id = %id, field = "username", "updating field");
        active.username = Set(Some(username));
    }
    if let Some(email) = payload.email {
        tracing::debug!(user_id = %id, field = "email", "updating field");
        let email = normalize_email(&email);
        let taken = Users::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .filter(users::Column::Id.ne(id))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::BadRequest(EMAIL_TAKEN.into()));
        }
        active.email = Set(email);
    }
    if let Some(password) = payload.password {
        tracing::debug!(user_id = %id, field = "password", "updating field");
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(imagen) = payload.imagen {
        tracing::debug!(user_id = %id, field = "imagen", "updating field");
        active.imagen = Set(Some(imagen));
    }
    if let Some(zona) = payload.zona {
        tracing::debug!(user_id = %id, field = "zona", "updating field");
        active.zona = Set(Some(zona));
    }
    if let Some(telefono) = payload.telefono {
        tracing::debug!(user_id = %id, field = "telefono", "updating field");
        active.telefono = Set(Some(telefono));
    }
    if let Some(mostrar) = payload.mostrar_contacto {
        tracing::debug!(user_id = %id, field = "mostrarContacto", value = mostrar, "updating field");
        active.mostrar_contacto = Set(mostrar);
    }
    if let Some(transacciones) = payload.transacciones {
        tracing::debug!(user_id = %id, field = "transacciones", count = transacciones.len(), "updating field");
        active.transacciones = Set(transactions_to_json(transacciones));
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let updated = active
        .update(&state.orm)
        .await
        .map_err(|e| AppError::from_write(e, EMAIL_TAKEN))?;
    to_document(&state.orm, updated).await
}

pub async fn delete_user(state: &AppState, id: &str) -> AppResult<DeleteUserResponse> {
    require_by_app_id(&state.orm, id).await?;
    let summary = delete_user_cascade(&state.orm, id).await?;
    Ok(DeleteUserResponse {
        message: "Usuario eliminado en cascada".into(),
        summary,
    })
}
