// ==========================================
// Suivi Production - Couche application
// ==========================================
// Câblage de l'état applicatif pour la couche HTTP.
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
