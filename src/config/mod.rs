// ==========================================
// Suivi Production - Couche configuration
// ==========================================
// Stockage: table config_kv
// ==========================================

pub mod config_manager;

pub use config_manager::{config_keys, ConfigManager};
