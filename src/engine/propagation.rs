// ==========================================
// Suivi Production - Moteur de propagation
// ==========================================
// Formalise deux invariants métier appliqués jusque-là au cas par
// cas dans les écrans:
// - l'effectif opérateurs est une propriété de l'équipe (semaine,
//   ligne, jour): même valeur pour toutes les références du jour
// - l'OF couvre la semaine entière d'une référence: même valeur pour
//   tous les jours de (semaine, ligne, référence)
// Le moteur mute les copies mémoire fournies et retourne les clefs
// modifiées; l'appelant persiste exactement celles-là.
// ==========================================


use crate::domain::planning::{PlanningEntry, PlanningKey};
use crate::domain::types::Day;
use crate::engine::error::{ReconciliationError, ReconciliationResult};

/// Borne haute par défaut de l'effectif opérateurs
pub const DEFAULT_OPERATOR_COUNT_MAX: u32 = 50;

// ==========================================
// PropagationEngine - propagation des champs partagés
// ==========================================
pub struct PropagationEngine {
    // moteur sans état
}

impl PropagationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Propage l'effectif opérateurs à toutes les références d'un jour
    ///
    /// # Paramètres
    /// - entries: cases de la (semaine, ligne) concernée
    /// - day: jour dont l'équipe change d'effectif
    /// - value: effectif, borné 0..=max
    ///
    /// # Retour
    /// Clefs des cases réellement modifiées (vide si déjà à la valeur:
    /// la propagation est idempotente)
    pub fn propagate_operator_count(
        &self,
        entries: &mut [PlanningEntry],
        day: Day,
        value: u32,
        max: u32,
    ) -> ReconciliationResult<Vec<PlanningKey>> {
        if value > max {
            return Err(ReconciliationError::Validation {
                field: "operator_count".to_string(),
                message: format!("effectif {} hors bornes 0..={}", value, max),
            });
        }

        let mut changed = Vec::new();
        for entry in entries.iter_mut() {
            if entry.key.day == day && entry.operator_count != value {
                entry.operator_count = value;
                changed.push(entry.key.clone());
            }
        }
        Ok(changed)
    }

    /// Propage l'OF à tous les jours d'une référence
    ///
    /// Une valeur vide efface l'OF (stocké None). Idempotent comme la
    /// propagation d'effectif.
    pub fn propagate_work_order(
        &self,
        entries: &mut [PlanningEntry],
        reference_id: &str,
        value: &str,
    ) -> Vec<PlanningKey> {
        let normalized = {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        let mut changed = Vec::new();
        for entry in entries.iter_mut() {
            if entry.key.reference_id == reference_id && entry.work_order_ref != normalized {
                entry.work_order_ref = normalized.clone();
                changed.push(entry.key.clone());
            }
        }
        changed
    }
}

impl Default for PropagationEngine {
    fn default() -> Self {
        Self::new()
    }
}
