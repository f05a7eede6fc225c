use intake::IntakeContext;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeContext,
    pub ping_message: String,
    /// Frontend bundle; `None` when no static directory is configured.
    pub spa: Option<ServeDir<ServeFile>>,
}
