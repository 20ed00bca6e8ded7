// ==========================================
// Suivi Production - Moteur de réconciliation des écarts
// ==========================================
// Responsabilité: lier quantité planifiée, production déclarée et
// causes 5M en une comptabilité cohérente par (référence, jour).
// Règle: moteur sans état, toutes les méthodes sont des fonctions
// pures sur les copies fournies par l'appelant. Les E/S (lecture /
// écriture du magasin) restent à la charge de la couche API.
// ==========================================


use crate::domain::non_conformity::{CauseBuckets, NonConformityRecord};
use crate::domain::planning::PlanningEntry;
use crate::domain::types::EntryState;
use crate::engine::error::{ReconciliationError, ReconciliationResult};
use serde::{Deserialize, Serialize};

/// Tolérance par défaut entre somme des causes et écart (unités)
pub const DEFAULT_CAUSE_TOLERANCE: u32 = 1;

// ==========================================
// CauseValidation - résultat d'une validation de causes
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseValidation {
    /// Somme des cinq seaux après normalisation
    pub total_5m: u32,
    /// Reste inexpliqué (écart - total_5m); affiché, jamais bloquant
    pub remainder: u32,
}

// ==========================================
// ReconciliationEngine - moteur de réconciliation
// ==========================================
pub struct ReconciliationEngine {
    // moteur sans état, aucune dépendance injectée
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // Métriques dérivées
    // ==========================================

    /// PCS Prod: pourcentage de production par rapport à la quantité source
    ///
    /// source = M si M > 0, sinon C. Résultat 0 si la source est nulle.
    /// Arrondi au plus proche, demi vers le haut; peut dépasser 100
    /// (surproduction).
    pub fn compute_delta(&self, entry: &PlanningEntry) -> u32 {
        let source = entry.source_qty();
        if source == 0 {
            return 0;
        }
        // Arithmétique entière: (dp*100 + source/2) / source, sans
        // troncature du demi (multiplication par 2 des deux membres).
        let dp = entry.production_declared as u64;
        let source = source as u64;
        ((dp * 200 + source) / (source * 2)) as u32
    }

    /// Ecart à expliquer par les causes: |source - DP| (EcartCDP)
    pub fn compute_gap(&self, entry: &PlanningEntry) -> u32 {
        let source = entry.source_qty();
        source.abs_diff(entry.production_declared)
    }

    // ==========================================
    // Validation des causes 5M
    // ==========================================

    /// Valide une attribution de causes contre un écart donné
    ///
    /// Règles:
    /// - seaux normalisés avant somme (la liste matière première fait
    ///   foi sur le scalaire si les deux divergent)
    /// - total_5m == 0 -> EmptyCauses
    /// - écart == 0 et total_5m > 0 -> CauseOverAttribution (rien à expliquer)
    /// - total_5m > écart + tolérance -> CauseOverAttribution
    /// - total_5m < écart -> accepté, le reste est retourné pour affichage
    ///   (l'attribution partielle n'est jamais bloquante)
    pub fn validate_causes(
        &self,
        gap: u32,
        buckets: &CauseBuckets,
        tolerance: u32,
    ) -> ReconciliationResult<CauseValidation> {
        let mut normalized = buckets.clone();
        normalized.normalize();
        let total_5m = normalized.total_5m();

        if total_5m == 0 {
            return Err(ReconciliationError::EmptyCauses);
        }
        if gap == 0 {
            return Err(ReconciliationError::CauseOverAttribution { total_5m, gap });
        }
        if total_5m > gap.saturating_add(tolerance) {
            return Err(ReconciliationError::CauseOverAttribution { total_5m, gap });
        }

        Ok(CauseValidation {
            total_5m,
            remainder: gap.saturating_sub(total_5m),
        })
    }

    // ==========================================
    // Machine d'états d'une case
    // ==========================================

    /// Etat d'une case au regard de ses quantités et de son
    /// enregistrement de causes éventuel
    ///
    /// Cycle: Unplanned -> Planned -> Declared -> CausesRequired ->
    /// CausesAttributed. Si les quantités changent après attribution,
    /// l'enregistrement peut devenir périmé (total au-delà du nouvel
    /// écart, ou écart redevenu nul): la case repasse en CausesRequired
    /// tant qu'une re-soumission n'a pas eu lieu.
    pub fn entry_state(
        &self,
        entry: &PlanningEntry,
        record: Option<&NonConformityRecord>,
        tolerance: u32,
    ) -> EntryState {
        if !entry.is_planned() && !entry.is_declared() {
            return EntryState::Unplanned;
        }
        if !entry.is_declared() {
            return EntryState::Planned;
        }

        let gap = self.compute_gap(entry);
        if gap == 0 {
            return EntryState::Declared;
        }

        match record {
            Some(rec) if self.attribution_still_valid(gap, rec, tolerance) => {
                EntryState::CausesAttributed
            }
            _ => EntryState::CausesRequired,
        }
    }

    /// Vrai si un enregistrement stocké explique encore l'écart courant
    ///
    /// L'attribution partielle reste valable; seul un total débordant
    /// l'écart courant (au-delà de la tolérance) rend l'enregistrement
    /// périmé.
    fn attribution_still_valid(
        &self,
        gap: u32,
        record: &NonConformityRecord,
        tolerance: u32,
    ) -> bool {
        record.total_5m > 0 && record.total_5m <= gap.saturating_add(tolerance)
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}
