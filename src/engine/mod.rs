// ==========================================
// Suivi Production - Couche moteur
// ==========================================
// Responsabilité: règles métier de réconciliation des écarts.
// Règles: le moteur ne fait aucun SQL, ne tient aucun état partagé,
// et n'effectue aucune E/S; toutes les fonctions sont synchrones et
// pures sur les données fournies par l'appelant.
// ==========================================

pub mod error;
pub mod propagation;
pub mod reconciliation;

// Réexport des moteurs
pub use error::{ReconciliationError, ReconciliationResult};
pub use propagation::{PropagationEngine, DEFAULT_OPERATOR_COUNT_MAX};
pub use reconciliation::{CauseValidation, ReconciliationEngine, DEFAULT_CAUSE_TOLERANCE};
