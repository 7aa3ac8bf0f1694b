use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::MarksPolicy;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub marks: Arc<dyn MarksPolicy>,
}
