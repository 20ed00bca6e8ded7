// ==========================================
// Suivi Production - API statistiques
// ==========================================
// Responsabilité: agrégats hebdomadaires pour les écrans de synthèse
// (tableau jour x référence, totaux, parts des causes 5M). Lecture
// seule; les pourcentages suivent le même arrondi que le moteur.
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::domain::types::{CauseCategory, Day};
use crate::engine::ReconciliationEngine;
use crate::repository::{NonConformityRepository, PlanningRepository};

/// Pourcentage entier, arrondi au plus proche (demi vers le haut)
fn percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator * 200 + denominator) / (denominator * 2)) as u32
}

/// Réduction u64 -> u32 saturée pour les totaux affichés
fn clamp_u32(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}

// ==========================================
// Vues d'agrégation
// ==========================================

/// Une cellule du tableau jour x référence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReferenceRow {
    pub reference_id: String,
    pub source_qty: u32,
    pub production_declared: u32,
    pub magasin_declared: u32,
    pub gap: u32,
    pub delta_percent: u32,
}

/// Synthèse d'un jour: lignes par référence + totaux
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: Day,
    pub operator_count: u32,
    pub rows: Vec<DayReferenceRow>,
    pub total_source: u32,
    pub total_declared: u32,
    pub day_delta_percent: u32,
}

/// Totaux d'une référence sur la semaine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTotal {
    pub reference_id: String,
    pub work_order_ref: Option<String>,
    pub total_source: u32,
    pub total_declared: u32,
    pub delta_percent: u32,
}

/// Synthèse hebdomadaire d'une ligne
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week_id: String,
    pub line_id: String,
    pub days: Vec<DaySummary>,
    pub references: Vec<ReferenceTotal>,
    pub total_source: u32,
    pub total_declared: u32,
    pub week_delta_percent: u32,
}

/// Part d'une catégorie 5M dans le total attribué
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseCategoryShare {
    pub category: CauseCategory,
    pub label: String,
    pub quantity: u32,
    /// Part dans le total attribué (%, arrondi au plus proche)
    pub share_percent: u32,
}

/// Synthèse 5M hebdomadaire d'une ligne
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseSummary {
    pub week_id: String,
    pub line_id: String,
    pub shares: Vec<CauseCategoryShare>,
    pub total_5m: u32,
    /// Somme des écarts |source - DP| de la semaine
    pub total_gap: u32,
    /// Ecart cumulé resté sans cause attribuée
    pub unexplained: u32,
}

// ==========================================
// StatsApi - API statistiques
// ==========================================
pub struct StatsApi {
    planning_repo: Arc<PlanningRepository>,
    non_conformity_repo: Arc<NonConformityRepository>,
    reconciliation: ReconciliationEngine,
}

impl StatsApi {
    pub fn new(
        planning_repo: Arc<PlanningRepository>,
        non_conformity_repo: Arc<NonConformityRepository>,
    ) -> Self {
        Self {
            planning_repo,
            non_conformity_repo,
            reconciliation: ReconciliationEngine::new(),
        }
    }

    /// Tableau jour x référence + totaux d'un couple (semaine, ligne)
    pub fn week_summary(&self, week_id: &str, line_id: &str) -> ApiResult<WeekSummary> {
        let entries = self.planning_repo.get_all_for_week_line(week_id, line_id)?;

        // Groupement par jour (BTreeMap: ordre lundi -> dimanche)
        let mut by_day: BTreeMap<Day, Vec<&crate::domain::planning::PlanningEntry>> =
            BTreeMap::new();
        for entry in &entries {
            by_day.entry(entry.key.day).or_default().push(entry);
        }

        let mut days = Vec::with_capacity(by_day.len());
        for (day, day_entries) in &by_day {
            let mut rows = Vec::with_capacity(day_entries.len());
            let mut total_source: u64 = 0;
            let mut total_declared: u64 = 0;
            // operator_count est partagé par toutes les références du
            // jour (invariant de propagation): n'importe quelle case
            // du jour porte la valeur.
            let operator_count = day_entries.first().map(|e| e.operator_count).unwrap_or(0);

            for entry in day_entries {
                let source = entry.source_qty();
                total_source += source as u64;
                total_declared += entry.production_declared as u64;
                rows.push(DayReferenceRow {
                    reference_id: entry.key.reference_id.clone(),
                    source_qty: source,
                    production_declared: entry.production_declared,
                    magasin_declared: entry.magasin_declared,
                    gap: self.reconciliation.compute_gap(entry),
                    delta_percent: self.reconciliation.compute_delta(entry),
                });
            }

            days.push(DaySummary {
                day: *day,
                operator_count,
                rows,
                total_source: clamp_u32(total_source),
                total_declared: clamp_u32(total_declared),
                day_delta_percent: percent(total_declared, total_source),
            });
        }

        // Totaux par référence (ordre stable: BTreeMap sur l'identifiant)
        let mut by_reference: BTreeMap<String, (Option<String>, u64, u64)> = BTreeMap::new();
        for entry in &entries {
            let slot = by_reference
                .entry(entry.key.reference_id.clone())
                .or_insert((None, 0, 0));
            if slot.0.is_none() {
                slot.0 = entry.work_order_ref.clone();
            }
            slot.1 += entry.source_qty() as u64;
            slot.2 += entry.production_declared as u64;
        }
        let references = by_reference
            .into_iter()
            .map(
                |(reference_id, (work_order_ref, source, declared))| ReferenceTotal {
                    reference_id,
                    work_order_ref,
                    total_source: clamp_u32(source),
                    total_declared: clamp_u32(declared),
                    delta_percent: percent(declared, source),
                },
            )
            .collect();

        let total_source: u64 = entries.iter().map(|e| e.source_qty() as u64).sum();
        let total_declared: u64 = entries.iter().map(|e| e.production_declared as u64).sum();

        Ok(WeekSummary {
            week_id: week_id.to_string(),
            line_id: line_id.to_string(),
            days,
            references,
            total_source: clamp_u32(total_source),
            total_declared: clamp_u32(total_declared),
            week_delta_percent: percent(total_declared, total_source),
        })
    }

    /// Parts des cinq catégories 5M sur la semaine + reste inexpliqué
    pub fn cause_summary(&self, week_id: &str, line_id: &str) -> ApiResult<CauseSummary> {
        let entries = self.planning_repo.get_all_for_week_line(week_id, line_id)?;
        let records = self
            .non_conformity_repo
            .get_all_for_week_line(week_id, line_id)?;

        let total_gap: u64 = entries
            .iter()
            .map(|e| self.reconciliation.compute_gap(e) as u64)
            .sum();

        let mut quantities: [u64; 5] = [0; 5];
        let mut total_5m: u64 = 0;
        for record in &records {
            let b = &record.buckets;
            quantities[0] += b.raw_material as u64;
            quantities[1] += b.absence as u64;
            quantities[2] += b.yield_loss as u64;
            quantities[3] += b.maintenance as u64;
            quantities[4] += b.quality as u64;
            total_5m += record.total_5m as u64;
        }

        let shares = CauseCategory::ALL
            .iter()
            .zip(quantities.iter())
            .map(|(category, quantity)| CauseCategoryShare {
                category: *category,
                label: category.label().to_string(),
                quantity: clamp_u32(*quantity),
                share_percent: percent(*quantity, total_5m),
            })
            .collect();

        Ok(CauseSummary {
            week_id: week_id.to_string(),
            line_id: line_id.to_string(),
            shares,
            total_5m: clamp_u32(total_5m),
            total_gap: clamp_u32(total_gap),
            unexplained: clamp_u32(total_gap.saturating_sub(total_5m)),
        })
    }
}
