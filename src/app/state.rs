// ==========================================
// Suivi Production - Etat applicatif
// ==========================================
// Responsabilité: câbler une connexion partagée à travers les
// repositories et instancier les API pour la couche HTTP.
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CauseApi, PlanningApi, RegistryApi, ReportApi, StatsApi};
use crate::config::ConfigManager;
use crate::db;
use crate::repository::{NonConformityRepository, PlanningRepository, RegistryRepository};

/// Etat applicatif
///
/// Contient les instances d'API et les ressources partagées. La
/// couche HTTP (hors périmètre) le tient comme état global.
pub struct AppState {
    /// Chemin du fichier base de données
    pub db_path: String,

    /// API planification
    pub planning_api: Arc<PlanningApi>,

    /// API causes 5M
    pub cause_api: Arc<CauseApi>,

    /// API statistiques
    pub stats_api: Arc<StatsApi>,

    /// API rapports
    pub report_api: Arc<ReportApi>,

    /// API référentiels
    pub registry_api: Arc<RegistryApi>,

    /// Gestionnaire de configuration
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// Initialise repositories, configuration et API sur une
    /// connexion partagée; crée le schéma manquant
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initialisation AppState");

        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("ouverture base de données impossible: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("initialisation du schéma: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Couche repository
        // ==========================================
        let planning_repo = Arc::new(PlanningRepository::from_connection(conn.clone()));
        let non_conformity_repo = Arc::new(NonConformityRepository::from_connection(conn.clone()));
        let registry_repo = Arc::new(RegistryRepository::from_connection(conn.clone()));

        // ==========================================
        // Configuration
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("initialisation ConfigManager: {}", e))?,
        );

        // ==========================================
        // Couche API
        // ==========================================
        let planning_api = Arc::new(PlanningApi::new(
            planning_repo.clone(),
            registry_repo.clone(),
            non_conformity_repo.clone(),
            config_manager.clone(),
        ));
        let cause_api = Arc::new(CauseApi::new(
            planning_repo.clone(),
            non_conformity_repo.clone(),
            config_manager.clone(),
        ));
        let stats_api = Arc::new(StatsApi::new(
            planning_repo.clone(),
            non_conformity_repo.clone(),
        ));
        let report_api = Arc::new(ReportApi::new(stats_api.clone()));
        let registry_api = Arc::new(RegistryApi::new(registry_repo));

        tracing::info!("AppState initialisé");
        Ok(Self {
            db_path,
            planning_api,
            cause_api,
            stats_api,
            report_api,
            registry_api,
            config_manager,
        })
    }
}

/// Chemin par défaut de la base de données
///
/// - variable d'environnement SUIVI_PROD_DB_PATH si définie
/// - sinon répertoire de données utilisateur / suivi-prod / suivi_prod.db
/// - repli: ./suivi_prod.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("SUIVI_PROD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./suivi_prod.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("suivi-prod");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("suivi_prod.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    // Les tests d'AppState::new() demandent un fichier réel: voir les
    // tests d'intégration.
}
