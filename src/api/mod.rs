// ==========================================
// Suivi Production - Couche API
// ==========================================
// Responsabilité: opérations en données simples pour la couche HTTP
// (hors périmètre). Chaque opération lit le magasin, appelle le
// moteur, persiste, et retourne des données simples ou une erreur
// typée.
// ==========================================

pub mod cause_api;
pub mod error;
pub mod planning_api;
pub mod registry_api;
pub mod report_api;
pub mod stats_api;

// Réexport des types principaux
pub use cause_api::{CauseApi, CauseSubmissionResult};
pub use error::{ApiError, ApiResult};
pub use planning_api::{EntryStatusView, PlanningApi};
pub use registry_api::RegistryApi;
pub use report_api::ReportApi;
pub use stats_api::{CauseSummary, StatsApi, WeekSummary};
