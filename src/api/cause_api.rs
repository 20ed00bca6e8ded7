// ==========================================
// Suivi Production - API causes 5M
// ==========================================
// Responsabilité: consultation et soumission des causes de
// non-conformité. L'écart est toujours recalculé depuis la case de
// planification vivante avant validation; la soumission remplace
// intégralement l'enregistrement précédent (upsert, jamais additif).
// Autorisation: seul le rôle user déclare des causes (contrôle de la
// couche entourante, le moteur reste agnostique au rôle).
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::non_conformity::{CauseBuckets, NonConformityKey, NonConformityRecord};
use crate::domain::planning::PlanningKey;
use crate::domain::types::Role;
use crate::engine::ReconciliationEngine;
use crate::repository::{NonConformityRepository, PlanningRepository};

// ==========================================
// CauseSubmissionResult - résultat d'une soumission
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseSubmissionResult {
    /// Enregistrement stocké (total_5m calculé inclus)
    pub record: NonConformityRecord,
    /// Reste inexpliqué après attribution (affichage, non bloquant)
    pub remainder: u32,
}

// ==========================================
// CauseApi - API causes 5M
// ==========================================
pub struct CauseApi {
    planning_repo: Arc<PlanningRepository>,
    non_conformity_repo: Arc<NonConformityRepository>,
    config: Arc<ConfigManager>,
    reconciliation: ReconciliationEngine,
}

impl CauseApi {
    pub fn new(
        planning_repo: Arc<PlanningRepository>,
        non_conformity_repo: Arc<NonConformityRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            planning_repo,
            non_conformity_repo,
            config,
            reconciliation: ReconciliationEngine::new(),
        }
    }

    // ==========================================
    // Consultation (pré-remplissage de la modale)
    // ==========================================

    /// Enregistrement de causes d'une clef, None si aucune déclaration
    ///
    /// None est un résultat attendu (la modale s'ouvre à zéro), pas
    /// une erreur.
    pub fn get_causes(&self, key: &NonConformityKey) -> ApiResult<Option<NonConformityRecord>> {
        Ok(self.non_conformity_repo.get(key)?)
    }

    // ==========================================
    // Soumission
    // ==========================================

    /// Valide puis enregistre une attribution de causes
    ///
    /// Déroulé:
    /// 1. contrôle de rôle (seul user déclare)
    /// 2. lecture de la case de planification (écart vivant)
    /// 3. validation moteur (sur-attribution / vide / écart nul)
    /// 4. upsert (remplacement complet) et retour de l'état stocké
    pub fn submit_causes(
        &self,
        key: &NonConformityKey,
        buckets: CauseBuckets,
        comment: Option<String>,
        declared_by: &str,
        role: Role,
    ) -> ApiResult<CauseSubmissionResult> {
        if role != Role::User {
            return Err(ApiError::Unauthorized {
                role: role.to_string(),
                operation: "déclaration de causes".to_string(),
            });
        }
        if declared_by.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "declared_by ne peut pas être vide".to_string(),
            ));
        }

        let planning_key = PlanningKey::new(
            &key.week_id,
            &key.line_id,
            key.day,
            &key.reference_id,
        );
        let entry = self.planning_repo.get(&planning_key)?.ok_or_else(|| {
            ApiError::NotFound(format!(
                "case de planification ({}, {}, {}, {})",
                key.week_id, key.line_id, key.day, key.reference_id
            ))
        })?;

        let gap = self.reconciliation.compute_gap(&entry);
        let tolerance = self.config.cause_tolerance();
        let validation = self
            .reconciliation
            .validate_causes(gap, &buckets, tolerance)?;

        let record = NonConformityRecord::new(
            key.clone(),
            buckets,
            comment,
            declared_by,
            chrono::Local::now().naive_local(),
        );
        let stored = self.non_conformity_repo.upsert(&record)?;

        tracing::info!(
            week_id = %key.week_id,
            line_id = %key.line_id,
            day = %key.day,
            reference_id = %key.reference_id,
            total_5m = stored.total_5m,
            remainder = validation.remainder,
            declared_by,
            "causes 5M enregistrées"
        );

        Ok(CauseSubmissionResult {
            record: stored,
            remainder: validation.remainder,
        })
    }
}
