use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        favorites::{AddFavoriteRequest, FavoriteProductList, FavoritesResponse},
        users::{DeleteUserResponse, UpdateUserRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{User, UserProfile},
    response::MessageBody,
    services::{favorite_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/favoritos", get(list_favorites).post(add_favorite))
        .route("/{id}/favoritos/{product_id}", delete(remove_favorite))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users without credentials", body = Vec<User>),
        (status = 401, description = "Missing token", body = MessageBody),
        (status = 403, description = "Invalid token", body = MessageBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(user_service::list_users(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Application id or storage id")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found", body = MessageBody)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(user_service::get_user(&state, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Duplicate email or missing field", body = MessageBody)
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let Json(payload) = payload?;
    let resp = user_service::register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Unreadable body or missing field", body = MessageBody),
        (status = 401, description = "Wrong password", body = MessageBody),
        (status = 404, description = "Unknown email", body = MessageBody)
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(payload) = payload?;
    Ok(Json(user_service::login_user(&state, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid update", body = MessageBody),
        (status = 404, description = "User not found", body = MessageBody)
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(payload) = payload?;
    Ok(Json(user_service::update_user(&state, &id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "User deleted with dependents", body = DeleteUserResponse),
        (status = 404, description = "User not found", body = MessageBody)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteUserResponse>> {
    Ok(Json(user_service::delete_user(&state, &id).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/favoritos",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Favorite products", body = FavoriteProductList),
        (status = 404, description = "User not found", body = MessageBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<FavoriteProductList>> {
    Ok(Json(favorite_service::list_favorites(&state, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/favoritos",
    params(
        ("id" = String, Path, description = "Application id")
    ),
    request_body = AddFavoriteRequest,
    responses(
        (status = 200, description = "Added to favorites", body = FavoritesResponse),
        (status = 400, description = "Missing productId or already a favorite", body = MessageBody),
        (status = 404, description = "User or product not found", body = MessageBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> AppResult<Json<FavoritesResponse>> {
    let Json(payload) = payload?;
    Ok(Json(
        favorite_service::add_favorite(&state, &id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/favoritos/{product_id}",
    params(
        ("id" = String, Path, description = "Application id"),
        ("product_id" = String, Path, description = "Product storage id")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = FavoritesResponse),
        (status = 404, description = "User or product not found", body = MessageBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<FavoritesResponse>> {
    Ok(Json(
        favorite_service::remove_favorite(&state, &id, &product_id).await?,
    ))
}
