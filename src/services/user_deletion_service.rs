use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{Donations, Favorites, Products, Users, donations, favorites, products, users},
    error::{AppError, AppResult},
};

/// Rows touched by a cascading user deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletionSummary {
    pub user_id: String,
    pub user_deleted: bool,
    pub products_deleted: u64,
    pub donations_deleted: u64,
    pub favorites_removed: u64,
}

/// Deletes a user with everything that depends on it, in one transaction:
/// its favorites, its products (and favorites/donations pointing at them),
/// and the donations it made.
pub async fn delete_user_cascade(orm: &OrmConn, user_id: &str) -> AppResult<DeletionSummary> {
    let txn = orm.begin().await?;

    let user = Users::find()
        .filter(users::Column::Id.eq(user_id))
        .one(&txn)
        .await?
        .ok_or_else(AppError::user_not_found)?;

    let owned: Vec<Uuid> = Products::find()
        .select_only()
        .column(products::Column::ObjectId)
        .filter(products::Column::OwnerId.eq(user.object_id))
        .into_tuple()
        .all(&txn)
        .await?;

    let favorites_removed = remove_favorites(&txn, user.object_id, &owned).await?;

    let donations_deleted = Donations::delete_many()
        .filter(
            Condition::any()
                .add(donations::Column::DonorId.eq(user.object_id))
                .add(donations::Column::ProductId.is_in(owned.clone())),
        )
        .exec(&txn)
        .await?
        .rows_affected;

    let products_deleted = Products::delete_many()
        .filter(products::Column::OwnerId.eq(user.object_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let users_deleted = Users::delete_by_id(user.object_id)
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;

    let summary = DeletionSummary {
        user_id: user_id.to_string(),
        user_deleted: users_deleted == 1,
        products_deleted,
        donations_deleted,
        favorites_removed,
    };
    tracing::info!(?summary, "user deleted in cascade");
    Ok(summary)
}

async fn remove_favorites<C: ConnectionTrait>(
    conn: &C,
    user: Uuid,
    owned_products: &[Uuid],
) -> AppResult<u64> {
    let result = Favorites::delete_many()
        .filter(
            Condition::any()
                .add(favorites::Column::UserId.eq(user))
                .add(favorites::Column::ProductId.is_in(owned_products.to_vec())),
        )
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
