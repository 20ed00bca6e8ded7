// ==========================================
// Aides de test d'intégration API
// ==========================================
// Environnement complet sur base SQLite temporaire: repositories,
// configuration et API, plus l'amorçage d'une grille de test.
// ==========================================

use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;

use suivi_prod::api::{CauseApi, PlanningApi, RegistryApi, ReportApi, StatsApi};
use suivi_prod::config::ConfigManager;
use suivi_prod::db;
use suivi_prod::repository::{
    NonConformityRepository, PlanningRepository, RegistryRepository,
};

// ==========================================
// ApiTestEnv - environnement de test API
// ==========================================

/// Environnement de test
///
/// Contient les API et les repositories (préparation de données)
pub struct ApiTestEnv {
    pub db_path: String,
    pub planning_api: Arc<PlanningApi>,
    pub cause_api: Arc<CauseApi>,
    pub stats_api: Arc<StatsApi>,
    pub report_api: Arc<ReportApi>,
    pub registry_api: Arc<RegistryApi>,
    pub config_manager: Arc<ConfigManager>,

    // Couche repository (préparation / vérification des données)
    pub planning_repo: Arc<PlanningRepository>,
    pub non_conformity_repo: Arc<NonConformityRepository>,
    pub registry_repo: Arc<RegistryRepository>,

    // Fichier temporaire (tenu pour la durée de vie de l'environnement)
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// Crée un environnement sur une base temporaire au schéma complet
    pub fn new() -> Result<Self, String> {
        suivi_prod::logging::init_test();

        let temp_file = NamedTempFile::new().map_err(|e| format!("fichier temporaire: {}", e))?;
        let db_path = temp_file.path().to_string_lossy().to_string();

        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("ouverture base: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("schéma: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let planning_repo = Arc::new(PlanningRepository::from_connection(conn.clone()));
        let non_conformity_repo = Arc::new(NonConformityRepository::from_connection(conn.clone()));
        let registry_repo = Arc::new(RegistryRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn).map_err(|e| format!("configuration: {}", e))?,
        );

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
        let registry_api = Arc::new(RegistryApi::new(registry_repo.clone()));

        Ok(Self {
            db_path,
            planning_api,
            cause_api,
            stats_api,
            report_api,
            registry_api,
            config_manager,
            planning_repo,
            non_conformity_repo,
            registry_repo,
            _temp_file: temp_file,
        })
    }

    /// Amorce le référentiel standard des tests: semaine "semaine48",
    /// une ligne avec les références REF-100 / REF-200, grille initialisée
    ///
    /// # Retour
    /// line_id de la ligne créée (UUID)
    pub fn seed_week_line(&self) -> String {
        self.registry_api
            .create_week("semaine48", "Semaine 48 - 2024")
            .expect("création semaine");
        let line = self
            .registry_api
            .create_line("Ligne 1", Some("Ligne d'assemblage"))
            .expect("création ligne");
        self.registry_api
            .create_reference("REF-100", &line.line_id, "Boîtier standard")
            .expect("création REF-100");
        self.registry_api
            .create_reference("REF-200", &line.line_id, "Boîtier renforcé")
            .expect("création REF-200");
        self.planning_api
            .init_week("semaine48", &line.line_id)
            .expect("initialisation grille");
        line.line_id
    }
}
