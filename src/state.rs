// src/state.rs
use std::sync::Arc;

use crate::backend::InventoryBackend;
use crate::transmission::TransmissionSessions;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn InventoryBackend>,
    pub sessions: TransmissionSessions,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(backend: Arc<dyn InventoryBackend>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            backend,
            sessions: TransmissionSessions::new(),
            jwt_secret: jwt_secret.into(),
        }
    }
}
