use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    /// Storage identity of the product. Kept as text so a malformed id
    /// reads as "not found" rather than a body rejection.
    pub product_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FavoriteProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

/// Acknowledgement of a favorites change with the resulting product ids.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoritesResponse {
    pub message: String,
    pub favoritos: Vec<Uuid>,
}
