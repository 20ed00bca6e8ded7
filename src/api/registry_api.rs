// ==========================================
// Suivi Production - API référentiels
// ==========================================
// Responsabilité: CRUD des référentiels (lignes, semaines,
// références, personnel, phases, horaires) avec validation d'entrée.
// ==========================================

use std::sync::Arc;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::registry::{Phase, ProductReference, ProductionLine, TimeSlot, Week, Worker};
use crate::repository::RegistryRepository;

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn require_non_empty(value: &str, field: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "{} ne peut pas être vide",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Validation légère d'une heure "HH:MM"
fn require_time(value: &str, field: &str) -> ApiResult<String> {
    let trimmed = require_non_empty(value, field)?;
    let valid = trimmed.len() == 5
        && trimmed.as_bytes()[2] == b':'
        && trimmed[0..2].parse::<u32>().map_or(false, |h| h < 24)
        && trimmed[3..5].parse::<u32>().map_or(false, |m| m < 60);
    if !valid {
        return Err(ApiError::InvalidInput(format!(
            "{}: format attendu HH:MM, reçu {}",
            field, trimmed
        )));
    }
    Ok(trimmed)
}

// ==========================================
// RegistryApi - API référentiels
// ==========================================
pub struct RegistryApi {
    registry_repo: Arc<RegistryRepository>,
}

impl RegistryApi {
    pub fn new(registry_repo: Arc<RegistryRepository>) -> Self {
        Self { registry_repo }
    }

    // ==========================================
    // Lignes de production
    // ==========================================

    pub fn create_line(&self, name: &str, description: Option<&str>) -> ApiResult<ProductionLine> {
        let line = ProductionLine {
            line_id: Uuid::new_v4().to_string(),
            name: require_non_empty(name, "name")?,
            description: description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            created_at: now(),
        };
        self.registry_repo.create_line(&line)?;
        tracing::info!(line_id = %line.line_id, name = %line.name, "ligne créée");
        Ok(line)
    }

    pub fn list_lines(&self) -> ApiResult<Vec<ProductionLine>> {
        Ok(self.registry_repo.list_lines()?)
    }

    pub fn delete_line(&self, line_id: &str) -> ApiResult<()> {
        if !self.registry_repo.delete_line(line_id)? {
            return Err(ApiError::NotFound(format!("ligne {}", line_id)));
        }
        Ok(())
    }

    // ==========================================
    // Semaines
    // ==========================================

    /// Crée une semaine; week_id est le nom métier (ex: "semaine48")
    pub fn create_week(&self, week_id: &str, label: &str) -> ApiResult<Week> {
        let week = Week {
            week_id: require_non_empty(week_id, "week_id")?,
            label: require_non_empty(label, "label")?,
            created_at: now(),
        };
        self.registry_repo.create_week(&week)?;
        tracing::info!(week_id = %week.week_id, "semaine créée");
        Ok(week)
    }

    pub fn list_weeks(&self) -> ApiResult<Vec<Week>> {
        Ok(self.registry_repo.list_weeks()?)
    }

    // ==========================================
    // Références produit
    // ==========================================

    /// Crée une référence; reference_id est le SKU métier, la ligne
    /// doit exister
    pub fn create_reference(
        &self,
        reference_id: &str,
        line_id: &str,
        designation: &str,
    ) -> ApiResult<ProductReference> {
        let line_id = require_non_empty(line_id, "line_id")?;
        if self.registry_repo.find_line(&line_id)?.is_none() {
            return Err(ApiError::NotFound(format!("ligne {}", line_id)));
        }
        let reference = ProductReference {
            reference_id: require_non_empty(reference_id, "reference_id")?,
            line_id,
            designation: require_non_empty(designation, "designation")?,
            created_at: now(),
        };
        self.registry_repo.create_reference(&reference)?;
        tracing::info!(reference_id = %reference.reference_id, line_id = %reference.line_id, "référence créée");
        Ok(reference)
    }

    pub fn list_references(&self, line_id: &str) -> ApiResult<Vec<ProductReference>> {
        Ok(self.registry_repo.list_references_for_line(line_id)?)
    }

    pub fn delete_reference(&self, reference_id: &str) -> ApiResult<()> {
        if !self.registry_repo.delete_reference(reference_id)? {
            return Err(ApiError::NotFound(format!("référence {}", reference_id)));
        }
        Ok(())
    }

    // ==========================================
    // Personnel
    // ==========================================

    pub fn create_worker(&self, name: &str, badge_no: Option<&str>) -> ApiResult<Worker> {
        let worker = Worker {
            worker_id: Uuid::new_v4().to_string(),
            name: require_non_empty(name, "name")?,
            badge_no: badge_no.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
            created_at: now(),
        };
        self.registry_repo.create_worker(&worker)?;
        Ok(worker)
    }

    pub fn list_workers(&self) -> ApiResult<Vec<Worker>> {
        Ok(self.registry_repo.list_workers()?)
    }

    pub fn delete_worker(&self, worker_id: &str) -> ApiResult<()> {
        if !self.registry_repo.delete_worker(worker_id)? {
            return Err(ApiError::NotFound(format!("opérateur {}", worker_id)));
        }
        Ok(())
    }

    // ==========================================
    // Phases
    // ==========================================

    pub fn create_phase(&self, label: &str) -> ApiResult<Phase> {
        let phase = Phase {
            phase_id: Uuid::new_v4().to_string(),
            label: require_non_empty(label, "label")?,
            created_at: now(),
        };
        self.registry_repo.create_phase(&phase)?;
        Ok(phase)
    }

    pub fn list_phases(&self) -> ApiResult<Vec<Phase>> {
        Ok(self.registry_repo.list_phases()?)
    }

    pub fn delete_phase(&self, phase_id: &str) -> ApiResult<()> {
        if !self.registry_repo.delete_phase(phase_id)? {
            return Err(ApiError::NotFound(format!("phase {}", phase_id)));
        }
        Ok(())
    }

    // ==========================================
    // Horaires
    // ==========================================

    pub fn create_time_slot(
        &self,
        label: &str,
        start_time: &str,
        end_time: &str,
    ) -> ApiResult<TimeSlot> {
        let slot = TimeSlot {
            slot_id: Uuid::new_v4().to_string(),
            label: require_non_empty(label, "label")?,
            start_time: require_time(start_time, "start_time")?,
            end_time: require_time(end_time, "end_time")?,
            created_at: now(),
        };
        self.registry_repo.create_time_slot(&slot)?;
        Ok(slot)
    }

    pub fn list_time_slots(&self) -> ApiResult<Vec<TimeSlot>> {
        Ok(self.registry_repo.list_time_slots()?)
    }

    pub fn delete_time_slot(&self, slot_id: &str) -> ApiResult<()> {
        if !self.registry_repo.delete_time_slot(slot_id)? {
            return Err(ApiError::NotFound(format!("horaire {}", slot_id)));
        }
        Ok(())
    }
}
