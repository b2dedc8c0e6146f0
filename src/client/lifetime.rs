use std::future::Future;

use tokio::sync::watch;

use super::api::ClientError;

/// Held by the owner of a card; dropping it ends the card's lifetime.
#[derive(Debug)]
pub struct LifetimeGuard {
    _alive: watch::Sender<()>,
}

/// Cheap handle used to run calls that must not outlive the card.
#[derive(Debug, Clone)]
pub struct Lifetime {
    alive: watch::Receiver<()>,
}

pub fn lifetime() -> (LifetimeGuard, Lifetime) {
    let (tx, rx) = watch::channel(());
    (LifetimeGuard { _alive: tx }, Lifetime { alive: rx })
}

impl Lifetime {
    pub fn is_ended(&self) -> bool {
        self.alive.has_changed().is_err()
    }

    /// Runs `fut` unless the lifetime ends first.
    pub async fn scope<F: Future>(&self, fut: F) -> Result<F::Output, ClientError> {
        let mut alive = self.alive.clone();
        tokio::select! {
            biased;
            // Nothing is ever sent, so this only resolves once the guard is gone.
            _ = alive.changed() => Err(ClientError::Cancelled),
            out = fut => Ok(out),
        }
    }
}
