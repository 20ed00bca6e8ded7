// ==========================================
// Suivi Production - API planification
// ==========================================
// Responsabilité: orchestrer lectures / écritures du magasin de
// planification autour du moteur de réconciliation. Le moteur reste
// pur; toute E/S se fait ici, avant / après l'appel moteur.
// delta_percent est recalculé à chaque écriture de quantité.
// ==========================================

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::non_conformity::NonConformityKey;
use crate::domain::planning::{PlanningEntry, PlanningKey};
use crate::domain::types::{Day, EntryState};
use crate::engine::{PropagationEngine, ReconciliationEngine};
use crate::repository::{NonConformityRepository, PlanningRepository, RegistryRepository};

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// ==========================================
// EntryStatusView - état d'une case pour l'écran de saisie
// ==========================================
// Pilote l'action "causes" du front: la modale ne s'ouvre que si
// gap > 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryStatusView {
    pub entry: PlanningEntry,
    pub gap: u32,
    pub state: EntryState,
}

// ==========================================
// PlanningApi - API planification
// ==========================================
pub struct PlanningApi {
    planning_repo: Arc<PlanningRepository>,
    registry_repo: Arc<RegistryRepository>,
    non_conformity_repo: Arc<NonConformityRepository>,
    config: Arc<ConfigManager>,
    reconciliation: ReconciliationEngine,
    propagation: PropagationEngine,
}

impl PlanningApi {
    pub fn new(
        planning_repo: Arc<PlanningRepository>,
        registry_repo: Arc<RegistryRepository>,
        non_conformity_repo: Arc<NonConformityRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            planning_repo,
            registry_repo,
            non_conformity_repo,
            config,
            reconciliation: ReconciliationEngine::new(),
            propagation: PropagationEngine::new(),
        }
    }

    // ==========================================
    // Initialisation de semaine
    // ==========================================

    /// Crée la grille vierge d'un couple (semaine, ligne): une case à
    /// zéro par référence x jour
    ///
    /// Idempotent: si la grille existe déjà, ne touche rien et
    /// retourne 0.
    ///
    /// # Retour
    /// Nombre de cases créées
    pub fn init_week(&self, week_id: &str, line_id: &str) -> ApiResult<usize> {
        if self.registry_repo.find_week(week_id)?.is_none() {
            return Err(ApiError::NotFound(format!("semaine {}", week_id)));
        }
        if self.registry_repo.find_line(line_id)?.is_none() {
            return Err(ApiError::NotFound(format!("ligne {}", line_id)));
        }
        if self.planning_repo.exists_for_week_line(week_id, line_id)? {
            tracing::debug!(week_id, line_id, "grille déjà initialisée");
            return Ok(0);
        }

        let references = self.registry_repo.list_references_for_line(line_id)?;
        if references.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "aucune référence rattachée à la ligne {}",
                line_id
            )));
        }

        let ts = now();
        let mut entries = Vec::with_capacity(references.len() * Day::ALL.len());
        for reference in &references {
            for day in Day::ALL {
                entries.push(PlanningEntry::empty(
                    PlanningKey::new(week_id, line_id, day, &reference.reference_id),
                    ts,
                ));
            }
        }

        let created = self.planning_repo.save_all(&entries)?;
        tracing::info!(week_id, line_id, created, "grille de planification initialisée");
        Ok(created)
    }

    // ==========================================
    // Lectures
    // ==========================================

    /// Toutes les cases d'un couple (semaine, ligne)
    pub fn get_week(&self, week_id: &str, line_id: &str) -> ApiResult<Vec<PlanningEntry>> {
        Ok(self.planning_repo.get_all_for_week_line(week_id, line_id)?)
    }

    /// Une case, erreur NotFound si la clef n'existe pas
    pub fn get_entry(&self, key: &PlanningKey) -> ApiResult<PlanningEntry> {
        self.planning_repo.get(key)?.ok_or_else(|| {
            ApiError::NotFound(format!(
                "case de planification ({}, {}, {}, {})",
                key.week_id, key.line_id, key.day, key.reference_id
            ))
        })
    }

    /// Etat d'une case (machine d'états + écart), pour piloter
    /// l'action causes du front
    pub fn get_entry_status(&self, key: &PlanningKey) -> ApiResult<EntryStatusView> {
        let entry = self.get_entry(key)?;
        let nc_key = NonConformityKey::new(
            &key.week_id,
            key.day,
            &key.line_id,
            &key.reference_id,
        );
        let record = self.non_conformity_repo.get(&nc_key)?;
        let tolerance = self.config.cause_tolerance();

        let gap = self.reconciliation.compute_gap(&entry);
        let state = self
            .reconciliation
            .entry_state(&entry, record.as_ref(), tolerance);

        Ok(EntryStatusView { entry, gap, state })
    }

    // ==========================================
    // Ecritures de quantités
    // ==========================================

    /// Met à jour les quantités d'une case (C / M / DP / DM) et
    /// recalcule delta_percent
    pub fn set_quantities(
        &self,
        key: &PlanningKey,
        planned_qty: u32,
        modified_qty: Option<u32>,
        production_declared: u32,
        magasin_declared: u32,
    ) -> ApiResult<PlanningEntry> {
        let mut entry = self.get_entry(key)?;

        entry.planned_qty = planned_qty;
        entry.modified_qty = modified_qty;
        entry.production_declared = production_declared;
        entry.magasin_declared = magasin_declared;
        entry.delta_percent = self.reconciliation.compute_delta(&entry);
        entry.updated_at = now();

        self.planning_repo.save(&entry)?;
        tracing::info!(
            week_id = %key.week_id,
            line_id = %key.line_id,
            day = %key.day,
            reference_id = %key.reference_id,
            delta_percent = entry.delta_percent,
            "quantités mises à jour"
        );
        Ok(entry)
    }

    // ==========================================
    // Propagations
    // ==========================================

    /// Fixe l'effectif opérateurs d'un jour: propagé à toutes les
    /// références du (semaine, ligne, jour)
    ///
    /// # Retour
    /// Nombre de cases modifiées (0 si déjà à la valeur)
    pub fn set_operator_count(
        &self,
        week_id: &str,
        line_id: &str,
        day: Day,
        value: u32,
    ) -> ApiResult<usize> {
        let mut entries = self.planning_repo.get_all_for_week_line(week_id, line_id)?;
        if entries.is_empty() {
            return Err(ApiError::NotFound(format!(
                "grille de planification ({}, {})",
                week_id, line_id
            )));
        }

        let max = self.config.operator_count_max();
        let changed = self
            .propagation
            .propagate_operator_count(&mut entries, day, value, max)?;

        self.persist_changed(&mut entries, &changed)?;
        tracing::info!(
            week_id,
            line_id,
            day = %day,
            value,
            affected = changed.len(),
            "effectif opérateurs propagé"
        );
        Ok(changed.len())
    }

    /// Fixe l'OF d'une référence: propagé à tous les jours du
    /// (semaine, ligne, référence)
    pub fn set_work_order(
        &self,
        week_id: &str,
        line_id: &str,
        reference_id: &str,
        value: &str,
    ) -> ApiResult<usize> {
        let mut entries = self.planning_repo.get_all_for_week_line(week_id, line_id)?;
        if entries.is_empty() {
            return Err(ApiError::NotFound(format!(
                "grille de planification ({}, {})",
                week_id, line_id
            )));
        }
        if !entries.iter().any(|e| e.key.reference_id == reference_id) {
            return Err(ApiError::NotFound(format!(
                "référence {} absente de la grille ({}, {})",
                reference_id, week_id, line_id
            )));
        }

        let changed = self
            .propagation
            .propagate_work_order(&mut entries, reference_id, value);

        self.persist_changed(&mut entries, &changed)?;
        tracing::info!(
            week_id,
            line_id,
            reference_id,
            affected = changed.len(),
            "ordre de fabrication propagé"
        );
        Ok(changed.len())
    }

    /// Persiste exactement les cases que le moteur a marquées
    /// modifiées, en une transaction
    fn persist_changed(
        &self,
        entries: &mut [PlanningEntry],
        changed: &[PlanningKey],
    ) -> ApiResult<()> {
        if changed.is_empty() {
            return Ok(());
        }
        let ts = now();
        let to_save: Vec<PlanningEntry> = entries
            .iter_mut()
            .filter(|e| changed.contains(&e.key))
            .map(|e| {
                e.updated_at = ts;
                e.clone()
            })
            .collect();
        self.planning_repo.save_all(&to_save)?;
        Ok(())
    }
}
