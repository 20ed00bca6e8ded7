// ==========================================
// Suivi Production - API rapports
// ==========================================
// Responsabilité: export CSV des synthèses hebdomadaires (tableau de
// production et répartition des causes 5M). Les exports PDF / Excel
// restent des collaborateurs externes; le CSV est l'export embarqué.
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::stats_api::StatsApi;

// ==========================================
// ReportApi - API rapports
// ==========================================
pub struct ReportApi {
    stats_api: Arc<StatsApi>,
}

impl ReportApi {
    pub fn new(stats_api: Arc<StatsApi>) -> Self {
        Self { stats_api }
    }

    /// Rapport production hebdomadaire (une ligne CSV par jour x référence)
    ///
    /// Colonnes: semaine, ligne, jour, référence, OF, quantité source,
    /// DP, DM, écart, delta (%), effectif.
    pub fn export_week_csv(
        &self,
        week_id: &str,
        line_id: &str,
        output_path: &Path,
    ) -> ApiResult<usize> {
        let summary = self.stats_api.week_summary(week_id, line_id)?;

        let mut writer = csv::Writer::from_path(output_path)
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        writer
            .write_record([
                "semaine",
                "ligne",
                "jour",
                "reference",
                "of",
                "qte_source",
                "declaration_production",
                "declaration_magasin",
                "ecart",
                "delta_percent",
                "effectif",
            ])
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        // L'OF vit au niveau (semaine, référence): repris des totaux
        // par référence pour chaque ligne du tableau.
        let mut rows = 0;
        for day in &summary.days {
            for row in &day.rows {
                let work_order = summary
                    .references
                    .iter()
                    .find(|r| r.reference_id == row.reference_id)
                    .and_then(|r| r.work_order_ref.clone())
                    .unwrap_or_default();

                writer
                    .write_record([
                        summary.week_id.as_str(),
                        summary.line_id.as_str(),
                        day.day.as_str(),
                        row.reference_id.as_str(),
                        work_order.as_str(),
                        row.source_qty.to_string().as_str(),
                        row.production_declared.to_string().as_str(),
                        row.magasin_declared.to_string().as_str(),
                        row.gap.to_string().as_str(),
                        row.delta_percent.to_string().as_str(),
                        day.operator_count.to_string().as_str(),
                    ])
                    .map_err(|e| ApiError::ExportError(e.to_string()))?;
                rows += 1;
            }
        }

        writer
            .flush()
            .map_err(|e| ApiError::ExportError(e.to_string()))?;
        tracing::info!(week_id, line_id, rows, path = %output_path.display(), "rapport hebdomadaire exporté");
        Ok(rows)
    }

    /// Rapport causes 5M hebdomadaire (une ligne CSV par catégorie)
    pub fn export_causes_csv(
        &self,
        week_id: &str,
        line_id: &str,
        output_path: &Path,
    ) -> ApiResult<usize> {
        let summary = self.stats_api.cause_summary(week_id, line_id)?;

        let mut writer = csv::Writer::from_path(output_path)
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        writer
            .write_record(["semaine", "ligne", "categorie", "quantite", "part_percent"])
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        let mut rows = 0;
        for share in &summary.shares {
            writer
                .write_record([
                    summary.week_id.as_str(),
                    summary.line_id.as_str(),
                    share.label.as_str(),
                    share.quantity.to_string().as_str(),
                    share.share_percent.to_string().as_str(),
                ])
                .map_err(|e| ApiError::ExportError(e.to_string()))?;
            rows += 1;
        }

        writer
            .flush()
            .map_err(|e| ApiError::ExportError(e.to_string()))?;
        tracing::info!(week_id, line_id, rows, path = %output_path.display(), "rapport causes 5M exporté");
        Ok(rows)
    }
}
