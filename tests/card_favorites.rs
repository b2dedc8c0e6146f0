use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use donar_api::{
    client::{
        ClientError, FavoriteState, FavoritesApi, ProductCard, Session,
        card::PendingToggle,
        image::PLACEHOLDER_IMAGE,
        lifetime::lifetime,
    },
    dto::favorites::FavoritesResponse,
    models::Product,
};
use uuid::Uuid;

/// In-process favorites backend; `fail` makes every call error.
#[derive(Default)]
struct FakeApi {
    favorites: Mutex<Vec<Uuid>>,
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeApi {
    fn with(ids: &[Uuid]) -> Self {
        Self {
            favorites: Mutex::new(ids.to_vec()),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ClientError::Api {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(())
    }

    fn ack(&self, message: &str) -> FavoritesResponse {
        FavoritesResponse {
            message: message.into(),
            favoritos: self.favorites.lock().unwrap().clone(),
        }
    }
}

fn product(id: Uuid) -> Product {
    Product {
        object_id: id,
        title: "Mesa".into(),
        description: None,
        categoria: None,
        image: None,
        images: vec![],
        provincia: None,
        owner: Uuid::nil(),
        condicion: None,
        valor_estimado: None,
        disponible: true,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl FavoritesApi for FakeApi {
    async fn list(&self, session: &Session) -> Result<Vec<Product>, ClientError> {
        self.check(format!("list {}", session.user_id))?;
        Ok(self.favorites.lock().unwrap().iter().map(|id| product(*id)).collect())
    }

    async fn add(&self, _session: &Session, product_id: &str) -> Result<FavoritesResponse, ClientError> {
        self.check(format!("add {product_id}"))?;
        self.favorites.lock().unwrap().push(product_id.parse().unwrap());
        Ok(self.ack("Producto agregado a favoritos"))
    }

    async fn remove(
        &self,
        _session: &Session,
        product_id: &str,
    ) -> Result<FavoritesResponse, ClientError> {
        self.check(format!("remove {product_id}"))?;
        let id: Uuid = product_id.parse().unwrap();
        self.favorites.lock().unwrap().retain(|f| *f != id);
        Ok(self.ack("Producto eliminado de favoritos"))
    }
}

fn session() -> Session {
    Session::new("u-1", "token")
}

#[tokio::test]
async fn load_marks_membership_by_identity() {
    let id = Uuid::new_v4();
    let api = FakeApi::with(&[Uuid::new_v4(), id]);
    let (_guard, lt) = lifetime();

    let mut card = ProductCard::new(id.to_string(), "Mesa");
    assert_eq!(card.favorite_state(), FavoriteState::Unknown);
    let state = card.load_favorite(&api, Some(&session()), &lt).await.unwrap();
    assert_eq!(state, Some(FavoriteState::Favorite));

    let mut other = ProductCard::new(Uuid::new_v4().to_string(), "Otra");
    other.load_favorite(&api, Some(&session()), &lt).await.unwrap();
    assert_eq!(other.favorite_state(), FavoriteState::NotFavorite);
}

#[tokio::test]
async fn load_without_session_does_nothing() {
    let api = FakeApi::default();
    let (_guard, lt) = lifetime();
    let mut card = ProductCard::new(Uuid::new_v4().to_string(), "Mesa");

    assert_eq!(card.load_favorite(&api, None, &lt).await.unwrap(), None);
    assert_eq!(card.favorite_state(), FavoriteState::Unknown);
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn load_failure_renders_not_favorite_and_reports() {
    let api = FakeApi::failing();
    let (_guard, lt) = lifetime();
    let mut card = ProductCard::new(Uuid::new_v4().to_string(), "Mesa");

    let err = card.load_favorite(&api, Some(&session()), &lt).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(card.favorite_state(), FavoriteState::NotFavorite);
}

#[tokio::test]
async fn toggle_adds_then_removes() {
    let id = Uuid::new_v4();
    let api = FakeApi::default();
    let (_guard, lt) = lifetime();
    let mut card = ProductCard::new(id.to_string(), "Mesa");

    let state = card.toggle_favorite(&api, Some(&session()), &lt).await.unwrap();
    assert_eq!(state, FavoriteState::Favorite);
    assert_eq!(card.favorite_title(), "Quitar de favoritos");
    assert_eq!(*api.favorites.lock().unwrap(), vec![id]);

    let state = card.toggle_favorite(&api, Some(&session()), &lt).await.unwrap();
    assert_eq!(state, FavoriteState::NotFavorite);
    assert!(api.favorites.lock().unwrap().is_empty());
    assert!(!card.is_loading());

    let calls = api.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![format!("add {id}"), format!("remove {id}")]);
}

#[tokio::test]
async fn failed_toggle_keeps_previous_state() {
    let api = FakeApi::failing();
    let (_guard, lt) = lifetime();
    let mut card = ProductCard::new(Uuid::new_v4().to_string(), "Mesa");

    let err = card.toggle_favorite(&api, Some(&session()), &lt).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(card.favorite_state(), FavoriteState::Unknown);
    assert!(!card.is_loading());
}

#[tokio::test]
async fn toggle_needs_session_and_refuses_reentry() {
    let api = FakeApi::default();
    let (_guard, lt) = lifetime();
    let mut card = ProductCard::new(Uuid::new_v4().to_string(), "Mesa");

    let err = card.toggle_favorite(&api, None, &lt).await.unwrap_err();
    assert!(matches!(err, ClientError::NoSession));

    let pending = card.begin_toggle().unwrap();
    assert_eq!(pending, PendingToggle::Add);
    assert!(card.is_loading());
    let err = card.toggle_favorite(&api, Some(&session()), &lt).await.unwrap_err();
    assert!(matches!(err, ClientError::Busy));
    assert!(api.calls.lock().unwrap().is_empty());

    card.finish_toggle(pending, true);
    assert!(card.is_favorite());
    assert!(!card.is_loading());
}

#[tokio::test]
async fn unmounted_card_is_left_untouched() {
    let api = FakeApi::with(&[]);
    let (guard, lt) = lifetime();
    let mut card = ProductCard::new(Uuid::new_v4().to_string(), "Mesa");
    drop(guard);

    let err = card.toggle_favorite(&api, Some(&session()), &lt).await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
    assert_eq!(card.favorite_state(), FavoriteState::Unknown);
    assert!(!card.is_loading());

    let err = card.load_favorite(&api, Some(&session()), &lt).await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
    assert_eq!(card.favorite_state(), FavoriteState::Unknown);
}

#[test]
fn display_labels_have_fallbacks() {
    let mut card = ProductCard::new("p1", "Mesa");
    assert_eq!(card.published_label(), "Publicado el: Sin fecha");
    assert_eq!(card.provincia_label(), "En: Sin especificar");
    assert_eq!(card.owner_label(), "Por: Usuario");
    assert_eq!(card.owner_profile_path(), None);
    assert_eq!(card.card_image().src(), PLACEHOLDER_IMAGE);
    assert!(card.shows_favorite_button());
    assert!(!card.shows_remove_favorite());

    card.fecha_publicacion = Some(Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap());
    card.provincia = Some("Salta".into());
    card.owner_name = Some("Ana".into());
    card.owner_id = Some("u-ana".into());
    card.images = Some(vec!["mesa.jpg".into()]);
    card.hide_favorite_button = true;
    card.show_remove_favorite = true;

    assert_eq!(card.published_label(), "Publicado el: 09/03/2025");
    assert_eq!(card.provincia_label(), "En: Salta");
    assert_eq!(card.owner_label(), "Por: Ana");
    assert_eq!(card.owner_profile_path().as_deref(), Some("/perfil-publico/u-ana"));
    assert_eq!(card.card_image().src(), "/uploads/products/mesa.jpg");
    assert!(!card.shows_favorite_button());
    assert!(card.shows_remove_favorite());
}

#[test]
fn card_from_product_uses_storage_identity() {
    let p = product(Uuid::new_v4());
    let card = ProductCard::from(&p);
    assert_eq!(card.id, p.object_id.to_string());
    assert_eq!(card.owner_id.as_deref(), Some(Uuid::nil().to_string().as_str()));
    assert_eq!(card.favorite_state(), FavoriteState::Unknown);
}
