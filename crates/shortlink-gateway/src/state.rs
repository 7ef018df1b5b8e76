use std::sync::Arc;

use shortlink_store::ShortLinkStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<ShortLinkStore>,
}

impl AppState {
    pub fn new(store: Arc<ShortLinkStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ShortLinkStore {
        &self.store
    }
}
