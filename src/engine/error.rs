// ==========================================
// Suivi Production - Erreurs du moteur de réconciliation
// ==========================================
// Erreurs typées, jamais d'exception générique pour le flot de
// contrôle. NotFound appartient à la couche repository, pas ici.
// ==========================================

use thiserror::Error;

/// Erreurs du moteur de réconciliation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationError {
    /// Entrée hors bornes déclarées (ex: operator_count hors 0..=50).
    /// Récupérable: l'appelant redemande la saisie.
    #[error("validation (champ={field}): {message}")]
    Validation { field: String, message: String },

    /// Causes attribuées au-delà de l'écart inexpliqué (tolérance
    /// comprise), ou causes soumises alors que l'écart est nul.
    /// Message bloquant côté utilisateur, pas de relance automatique.
    #[error("sur-attribution des causes: total_5m={total_5m} > écart={gap}")]
    CauseOverAttribution { total_5m: u32, gap: u32 },

    /// Soumission dont les cinq seaux sont à zéro: une soumission doit
    /// attribuer au moins une unité (l'effacement est une suppression,
    /// pas une soumission).
    #[error("soumission de causes vide: aucun seau renseigné")]
    EmptyCauses,
}

/// Alias de Result pour le moteur
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;
