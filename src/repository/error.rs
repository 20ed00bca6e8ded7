// ==========================================
// Suivi Production - Erreurs de la couche repository
// ==========================================
// Outil: macro dérive thiserror
// ==========================================

use thiserror::Error;

/// Erreurs de la couche repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Base de données =====
    #[error("enregistrement introuvable: {entity} ({id})")]
    NotFound { entity: String, id: String },

    #[error("connexion base de données: {0}")]
    DatabaseConnectionError(String),

    #[error("verrou base de données: {0}")]
    LockError(String),

    #[error("transaction: {0}")]
    DatabaseTransactionError(String),

    #[error("requête: {0}")]
    DatabaseQueryError(String),

    #[error("contrainte d'unicité violée: {0}")]
    UniqueConstraintViolation(String),

    #[error("contrainte de clef étrangère violée: {0}")]
    ForeignKeyViolation(String),

    // ===== Qualité de données =====
    #[error("valeur de colonne invalide (colonne={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== Générique =====
    #[error("erreur interne: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::FieldValueError {
            field: "json".to_string(),
            message: err.to_string(),
        }
    }
}

/// Alias de Result pour la couche repository
pub type RepositoryResult<T> = Result<T, RepositoryError>;
