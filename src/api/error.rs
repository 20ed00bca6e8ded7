// ==========================================
// Suivi Production - Erreurs de la couche API
// ==========================================
// Responsabilité: convertir les erreurs repository / moteur en
// erreurs métier lisibles par l'utilisateur final. Tout message
// d'erreur porte une raison explicite.
// ==========================================

use thiserror::Error;

use crate::engine::ReconciliationError;
use crate::repository::RepositoryError;

/// Erreurs de la couche API
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Règles métier (réconciliation)
    // ==========================================
    /// Causes attribuées au-delà de l'écart inexpliqué (message bloquant)
    #[error("sur-attribution: les causes ({total_5m}) dépassent l'écart à expliquer ({gap})")]
    CauseOverAttribution { total_5m: u32, gap: u32 },

    /// Soumission de causes sans la moindre unité attribuée
    #[error("soumission de causes vide: attribuer au moins une unité")]
    EmptyCauses,

    // ==========================================
    // Entrées / autorisations
    // ==========================================
    #[error("entrée invalide: {0}")]
    InvalidInput(String),

    #[error("ressource introuvable: {0}")]
    NotFound(String),

    #[error("opération non autorisée pour le rôle {role}: {operation}")]
    Unauthorized { role: String, operation: String },

    #[error("règle métier violée: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // Accès aux données
    // ==========================================
    #[error("erreur base de données: {0}")]
    DatabaseError(String),

    #[error("connexion base de données: {0}")]
    DatabaseConnectionError(String),

    #[error("transaction base de données: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // Export
    // ==========================================
    #[error("export rapport: {0}")]
    ExportError(String),

    // ==========================================
    // Générique
    // ==========================================
    #[error("erreur interne: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// Conversion depuis RepositoryError
// But: transformer l'erreur technique en message métier
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} ({}) inexistant", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("verrou base de données: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("contrainte d'unicité: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("contrainte de clef étrangère: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("colonne {}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// Conversion depuis ReconciliationError
// ==========================================
impl From<ReconciliationError> for ApiError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::Validation { field, message } => {
                ApiError::InvalidInput(format!("champ {}: {}", field, message))
            }
            ReconciliationError::CauseOverAttribution { total_5m, gap } => {
                ApiError::CauseOverAttribution { total_5m, gap }
            }
            ReconciliationError::EmptyCauses => ApiError::EmptyCauses,
        }
    }
}

/// Alias de Result pour la couche API
pub type ApiResult<T> = Result<T, ApiError>;
