use chrono::{DateTime, Utc};

use super::{
    api::{ClientError, FavoritesApi, Session},
    image::{CardImage, resolve_main_image},
    lifetime::Lifetime,
};
use crate::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteState {
    #[default]
    Unknown,
    NotFavorite,
    Favorite,
}

/// What a started toggle is about to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingToggle {
    Add,
    Remove,
}

/// Summary card of a product, with its favorite state kept in sync with
/// the server.
#[derive(Debug, Clone, Default)]
pub struct ProductCard {
    /// Storage identity of the product.
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub categoria: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub fecha_publicacion: Option<DateTime<Utc>>,
    pub provincia: Option<String>,
    pub owner_name: Option<String>,
    pub owner_id: Option<String>,
    pub condicion: Option<String>,
    pub valor_estimado: Option<i64>,
    pub disponible: Option<bool>,
    pub hide_favorite_button: bool,
    pub show_remove_favorite: bool,
    favorite: FavoriteState,
    loading: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.object_id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            categoria: product.categoria.clone(),
            image: product.image.clone(),
            images: Some(product.images.clone()),
            fecha_publicacion: Some(product.created_at),
            provincia: product.provincia.clone(),
            owner_id: Some(product.owner.to_string()),
            condicion: product.condicion.clone(),
            valor_estimado: product.valor_estimado,
            disponible: Some(product.disponible),
            ..Self::default()
        }
    }
}

impl ProductCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn favorite_state(&self) -> FavoriteState {
        self.favorite
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite == FavoriteState::Favorite
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn main_image(&self) -> Option<String> {
        resolve_main_image(self.images.as_deref(), self.image.as_deref())
    }

    pub fn card_image(&self) -> CardImage {
        CardImage::new(self.main_image())
    }

    pub fn published_label(&self) -> String {
        match self.fecha_publicacion {
            Some(date) => format!("Publicado el: {}", date.format("%d/%m/%Y")),
            None => "Publicado el: Sin fecha".to_string(),
        }
    }

    pub fn provincia_label(&self) -> String {
        format!(
            "En: {}",
            self.provincia
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or("Sin especificar")
        )
    }

    pub fn owner_label(&self) -> String {
        format!(
            "Por: {}",
            self.owner_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or("Usuario")
        )
    }

    pub fn owner_profile_path(&self) -> Option<String> {
        self.owner_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("/perfil-publico/{id}"))
    }

    pub fn favorite_title(&self) -> &'static str {
        if self.is_favorite() {
            "Quitar de favoritos"
        } else {
            "Agregar a favoritos"
        }
    }

    pub fn shows_favorite_button(&self) -> bool {
        !self.hide_favorite_button
    }

    /// Favorites listings render a remove action instead of the toggle.
    pub fn shows_remove_favorite(&self) -> bool {
        self.show_remove_favorite
    }

    /// Fetches the user's favorites and derives this card's membership.
    /// Without a session nothing is fetched and the state stays unknown.
    /// On failure the card renders as not-favorite and the error is
    /// returned for the caller to surface.
    pub async fn load_favorite(
        &mut self,
        api: &dyn FavoritesApi,
        session: Option<&Session>,
        lifetime: &Lifetime,
    ) -> Result<Option<FavoriteState>, ClientError> {
        let Some(session) = session else {
            return Ok(None);
        };

        match lifetime.scope(api.list(session)).await? {
            Ok(favs) => {
                let found = favs.iter().any(|p| p.object_id.to_string() == self.id);
                self.favorite = if found {
                    FavoriteState::Favorite
                } else {
                    FavoriteState::NotFavorite
                };
                Ok(Some(self.favorite))
            }
            Err(err) => {
                tracing::warn!(product_id = %self.id, error = %err, "could not load favorite state");
                self.favorite = FavoriteState::NotFavorite;
                Err(err)
            }
        }
    }

    /// Marks the card busy and decides the direction of the toggle.
    pub fn begin_toggle(&mut self) -> Result<PendingToggle, ClientError> {
        if self.loading {
            return Err(ClientError::Busy);
        }
        self.loading = true;
        Ok(if self.is_favorite() {
            PendingToggle::Remove
        } else {
            PendingToggle::Add
        })
    }

    /// Applies the outcome of a toggle. Failures leave the previous state.
    pub fn finish_toggle(&mut self, pending: PendingToggle, succeeded: bool) {
        self.loading = false;
        if succeeded {
            self.favorite = match pending {
                PendingToggle::Add => FavoriteState::Favorite,
                PendingToggle::Remove => FavoriteState::NotFavorite,
            };
        }
    }

    pub async fn toggle_favorite(
        &mut self,
        api: &dyn FavoritesApi,
        session: Option<&Session>,
        lifetime: &Lifetime,
    ) -> Result<FavoriteState, ClientError> {
        let session = session.ok_or(ClientError::NoSession)?;
        let pending = self.begin_toggle()?;
        let product_id = self.id.clone();

        let call = async {
            match pending {
                PendingToggle::Add => api.add(session, &product_id).await,
                PendingToggle::Remove => api.remove(session, &product_id).await,
            }
        };
        let outcome = lifetime.scope(call).await;

        match outcome {
            Ok(Ok(_)) => {
                self.finish_toggle(pending, true);
                Ok(self.favorite)
            }
            Ok(Err(err)) => {
                tracing::warn!(product_id = %self.id, error = %err, "favorite toggle failed");
                self.finish_toggle(pending, false);
                Err(err)
            }
            Err(cancelled) => {
                self.loading = false;
                Err(cancelled)
            }
        }
    }
}
