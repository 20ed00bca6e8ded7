// ==========================================
// Suivi Production - Point d'entrée
// ==========================================
// Amorçage: journalisation, base de données, état applicatif. La
// couche HTTP (hors périmètre) monte les API exposées par AppState.
// ==========================================

use suivi_prod::app::{get_default_db_path, AppState};

fn main() {
    suivi_prod::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", suivi_prod::APP_NAME);
    tracing::info!("version: {}", suivi_prod::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("base de données: {}", db_path);

    match AppState::new(db_path) {
        Ok(_state) => {
            tracing::info!("état applicatif prêt; en attente de la couche HTTP");
        }
        Err(e) => {
            tracing::error!("initialisation impossible: {}", e);
            std::process::exit(1);
        }
    }
}
