use std::sync::Arc;

use arthra_export::styles::DocumentStyles;
use arthra_export::ExportFormat;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub styles: Arc<DocumentStyles>,
    /// Used when a report request does not name a format.
    pub report_format: ExportFormat,
}

// Manual impl: cloning the state must not require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            styles: Arc::clone(&self.styles),
            report_format: self.report_format,
        }
    }
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            styles: Arc::new(DocumentStyles::default()),
            report_format: ExportFormat::default(),
        }
    }
}
