// ==========================================
// Suivi Production - Modèle de planification
// ==========================================
// Une case de planification = (semaine, ligne, jour, référence).
// C = quantité planifiée, M = quantité modifiée, DP = déclaration
// production, DM = déclaration magasin, OF = ordre de fabrication.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::Day;

// ==========================================
// PlanningKey - clef composite d'une case
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanningKey {
    pub week_id: String,      // ex: "semaine48"
    pub line_id: String,      // ligne de production
    pub day: Day,             // jour de la semaine
    pub reference_id: String, // référence produit (SKU)
}

impl PlanningKey {
    pub fn new(week_id: &str, line_id: &str, day: Day, reference_id: &str) -> Self {
        Self {
            week_id: week_id.to_string(),
            line_id: line_id.to_string(),
            day,
            reference_id: reference_id.to_string(),
        }
    }
}

// ==========================================
// PlanningEntry - case de planification
// ==========================================
// Invariant: delta_percent est recalculé à chaque écriture de
// planned_qty / modified_qty / production_declared (couche API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningEntry {
    pub key: PlanningKey,

    // ===== Quantités =====
    pub planned_qty: u32,          // C - quantité planifiée
    pub modified_qty: Option<u32>, // M - quantité ajustée (prioritaire si > 0)
    pub production_declared: u32,  // DP - quantité produite déclarée
    pub magasin_declared: u32,     // DM - quantité déclarée par le magasin

    // ===== Champs partagés =====
    // operator_count: partagé entre toutes les références du même
    // (semaine, ligne, jour) - propriété de l'équipe, pas de la référence.
    pub operator_count: u32,
    // work_order_ref: partagé entre tous les jours de la même
    // (semaine, ligne, référence) - l'OF couvre la semaine entière.
    pub work_order_ref: Option<String>,

    // ===== Dérivé =====
    pub delta_percent: u32, // PCS Prod - arrondi au plus proche, >100 possible

    pub updated_at: NaiveDateTime,
}

impl PlanningEntry {
    /// Case vierge (initialisation de semaine: toutes quantités à zéro)
    pub fn empty(key: PlanningKey, now: NaiveDateTime) -> Self {
        Self {
            key,
            planned_qty: 0,
            modified_qty: None,
            production_declared: 0,
            magasin_declared: 0,
            operator_count: 0,
            work_order_ref: None,
            delta_percent: 0,
            updated_at: now,
        }
    }

    /// Quantité source des calculs d'écart: M si > 0, sinon C
    pub fn source_qty(&self) -> u32 {
        match self.modified_qty {
            Some(m) if m > 0 => m,
            _ => self.planned_qty,
        }
    }

    /// Vrai si au moins une quantité a été saisie
    pub fn is_planned(&self) -> bool {
        self.source_qty() > 0
    }

    /// Vrai si une production a été déclarée
    pub fn is_declared(&self) -> bool {
        self.production_declared > 0
    }
}
