mod common;

use common::{create_product, register, setup_state};
use donar_api::{
    dto::favorites::AddFavoriteRequest, error::AppError, services::favorite_service,
};
use uuid::Uuid;

fn add_request(product: Uuid) -> AddFavoriteRequest {
    AddFavoriteRequest {
        product_id: Some(product.to_string()),
    }
}

#[tokio::test]
async fn adding_twice_keeps_one_membership() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = register(&state, "u-1", "fav@example.com").await?.user;
    let product = create_product(&state, user.object_id, "Mesa").await?;

    let first = favorite_service::add_favorite(&state, "u-1", add_request(product.object_id)).await?;
    assert_eq!(first.message, "Producto agregado a favoritos");
    assert_eq!(first.favoritos, vec![product.object_id]);

    let second = favorite_service::add_favorite(&state, "u-1", add_request(product.object_id))
        .await
        .unwrap_err();
    assert!(matches!(second, AppError::BadRequest(_)));
    assert_eq!(second.to_string(), "El producto ya está en favoritos");

    let list = favorite_service::list_favorites(&state, "u-1").await?;
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].object_id, product.object_id);
    Ok(())
}

#[tokio::test]
async fn removing_is_idempotent() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = register(&state, "u-1", "rm@example.com").await?.user;
    let keep = create_product(&state, user.object_id, "Libro").await?;
    let drop_me = create_product(&state, user.object_id, "Radio").await?;

    favorite_service::add_favorite(&state, "u-1", add_request(keep.object_id)).await?;
    favorite_service::add_favorite(&state, "u-1", add_request(drop_me.object_id)).await?;

    let pid = drop_me.object_id.to_string();
    let first = favorite_service::remove_favorite(&state, "u-1", &pid).await?;
    assert_eq!(first.message, "Producto eliminado de favoritos");
    assert_eq!(first.favoritos, vec![keep.object_id]);

    let second = favorite_service::remove_favorite(&state, "u-1", &pid).await?;
    assert_eq!(second.favoritos, first.favoritos);
    Ok(())
}

#[tokio::test]
async fn favorites_keep_insertion_order() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = register(&state, "u-1", "order@example.com").await?.user;
    let a = create_product(&state, user.object_id, "A").await?;
    let b = create_product(&state, user.object_id, "B").await?;
    let c = create_product(&state, user.object_id, "C").await?;

    for p in [&b, &c, &a] {
        favorite_service::add_favorite(&state, "u-1", add_request(p.object_id)).await?;
    }

    let titles: Vec<String> = favorite_service::list_favorites(&state, "u-1")
        .await?
        .items
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["B", "C", "A"]);
    Ok(())
}

#[tokio::test]
async fn missing_or_unknown_ids_are_reported() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = register(&state, "u-1", "ids@example.com").await?.user;
    let product = create_product(&state, user.object_id, "Cama").await?;

    let missing = favorite_service::add_favorite(&state, "u-1", AddFavoriteRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::BadRequest(_)));
    assert_eq!(missing.to_string(), "Falta productId");

    let unknown = favorite_service::add_favorite(&state, "u-1", add_request(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(unknown.to_string(), "Producto no encontrado");

    let malformed = favorite_service::add_favorite(
        &state,
        "u-1",
        AddFavoriteRequest {
            product_id: Some("no-es-un-id".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(malformed, AppError::NotFound(_)));

    let no_user = favorite_service::add_favorite(&state, "ghost", add_request(product.object_id))
        .await
        .unwrap_err();
    assert_eq!(no_user.to_string(), "Usuario no encontrado");

    let no_user = favorite_service::list_favorites(&state, "ghost").await.unwrap_err();
    assert!(matches!(no_user, AppError::NotFound(_)));

    let remove_unknown =
        favorite_service::remove_favorite(&state, "u-1", &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
    assert!(matches!(remove_unknown, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn concurrent_adds_store_one_row() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = register(&state, "u-1", "race@example.com").await?.user;
    let product = create_product(&state, user.object_id, "Estufa").await?;

    let (a, b) = tokio::join!(
        favorite_service::add_favorite(&state, "u-1", add_request(product.object_id)),
        favorite_service::add_favorite(&state, "u-1", add_request(product.object_id)),
    );
    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);

    let list = favorite_service::list_favorites(&state, "u-1").await?;
    assert_eq!(list.items.len(), 1);
    Ok(())
}
