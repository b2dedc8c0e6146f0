use chrono::Utc;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::favorites::{AddFavoriteRequest, FavoriteProductList, FavoritesResponse},
    entity::{Favorites, Products, favorites, products},
    error::{AppError, AppResult},
    models::Product,
    services::user_service::{favorite_ids, require_by_app_id},
    state::AppState,
};

/// Resolves a product by storage identity. Ids that do not parse can not
/// exist, so they are reported as missing.
async fn require_product(orm: &OrmConn, product_id: &str) -> AppResult<products::Model> {
    let object_id = Uuid::parse_str(product_id.trim()).map_err(|_| AppError::product_not_found())?;
    Products::find_by_id(object_id)
        .one(orm)
        .await?
        .ok_or_else(AppError::product_not_found)
}

async fn current_ids(orm: &OrmConn, user: Uuid) -> AppResult<Vec<Uuid>> {
    let mut favs = favorite_ids(orm, &[user]).await?;
    Ok(favs.remove(&user).unwrap_or_default())
}

pub async fn list_favorites(state: &AppState, user_id: &str) -> AppResult<FavoriteProductList> {
    let user = require_by_app_id(&state.orm, user_id).await?;
    let items = Products::find()
        .inner_join(Favorites)
        .filter(favorites::Column::UserId.eq(user.object_id))
        .order_by_asc(favorites::Column::AddedAt)
        .order_by_asc(favorites::Column::ProductId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok(FavoriteProductList { items })
}

/// Adds with a single conditional insert on the (user, product) key, so two
/// concurrent adds can not both succeed.
pub async fn add_favorite(
    state: &AppState,
    user_id: &str,
    payload: AddFavoriteRequest,
) -> AppResult<FavoritesResponse> {
    let user = require_by_app_id(&state.orm, user_id).await?;
    let product_id = payload
        .product_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Falta productId".into()))?;
    let product = require_product(&state.orm, &product_id).await?;

    let row = favorites::ActiveModel {
        user_id: Set(user.object_id),
        product_id: Set(product.object_id),
        added_at: Set(Utc::now().fixed_offset()),
    };
    let inserted = Favorites::insert(row)
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::ProductId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&state.orm)
        .await?;

    if inserted == 0 {
        return Err(AppError::BadRequest(
            "El producto ya está en favoritos".into(),
        ));
    }
    tracing::info!(user_id = %user.id, product_id = %product.object_id, "favorite added");

    Ok(FavoritesResponse {
        message: "Producto agregado a favoritos".into(),
        favoritos: current_ids(&state.orm, user.object_id).await?,
    })
}

/// Removing a product that is not in the favorites is not an error.
pub async fn remove_favorite(
    state: &AppState,
    user_id: &str,
    product_id: &str,
) -> AppResult<FavoritesResponse> {
    let user = require_by_app_id(&state.orm, user_id).await?;
    let product = require_product(&state.orm, product_id).await?;

    let removed = Favorites::delete_many()
        .filter(favorites::Column::UserId.eq(user.object_id))
        .filter(favorites::Column::ProductId.eq(product.object_id))
        .exec(&state.orm)
        .await?
        .rows_affected;
    tracing::info!(user_id = %user.id, product_id = %product.object_id, removed, "favorite removed");

    Ok(FavoritesResponse {
        message: "Producto eliminado de favoritos".into(),
        favoritos: current_ids(&state.orm, user.object_id).await?,
    })
}
