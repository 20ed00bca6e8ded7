// ==========================================
// Suivi Production - Journalisation
// ==========================================
// tracing + tracing-subscriber, niveau piloté par variable
// d'environnement.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de journalisation
///
/// # Variables d'environnement
/// - RUST_LOG: filtre de niveau (défaut: info)
///   ex: RUST_LOG=debug ou RUST_LOG=suivi_prod=trace
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Initialisation pour les tests (niveau debug, sortie capturée)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
