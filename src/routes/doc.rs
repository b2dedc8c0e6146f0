use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        favorites::{AddFavoriteRequest, FavoriteProductList, FavoritesResponse},
        users::{DeleteUserResponse, UpdateUserRequest},
    },
    models::{Product, Transaction, User, UserProfile},
    response::MessageBody,
    routes::{health, users},
    services::user_deletion_service::DeletionSummary,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::list_users,
        users::get_user,
        users::register,
        users::login,
        users::update_user,
        users::delete_user,
        users::list_favorites,
        users::add_favorite,
        users::remove_favorite
    ),
    components(
        schemas(
            User,
            UserProfile,
            Product,
            Transaction,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateUserRequest,
            DeleteUserResponse,
            DeletionSummary,
            AddFavoriteRequest,
            FavoriteProductList,
            FavoritesResponse,
            MessageBody
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Accounts, authentication and profiles"),
        (name = "Favorites", description = "Favorite products of a user"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
