// ==========================================
// Suivi Production - Repository référentiels
// ==========================================
// Tables: production_line / week / product_reference / worker /
// phase / time_slot. CRUD pur.
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::open_sqlite_connection;
use crate::domain::registry::{Phase, ProductReference, ProductionLine, TimeSlot, Week, Worker};
use crate::repository::error::{RepositoryError, RepositoryResult};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let value: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&value, TS_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// ==========================================
// RegistryRepository - référentiels
// ==========================================
pub struct RegistryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RegistryRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Lignes de production
    // ==========================================

    pub fn create_line(&self, line: &ProductionLine) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO production_line (line_id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                line.line_id,
                line.name,
                line.description,
                line.created_at.format(TS_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    pub fn find_line(&self, line_id: &str) -> RepositoryResult<Option<ProductionLine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT line_id, name, description, created_at FROM production_line WHERE line_id = ?1",
        )?;
        let mut rows = stmt.query_map(params![line_id], |row| {
            Ok(ProductionLine {
                line_id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                created_at: parse_ts(row, 3)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    pub fn list_lines(&self) -> RepositoryResult<Vec<ProductionLine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT line_id, name, description, created_at FROM production_line ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ProductionLine {
                line_id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                created_at: parse_ts(row, 3)?,
            })
        })?;
        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    pub fn delete_line(&self, line_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM production_line WHERE line_id = ?1",
            params![line_id],
        )?;
        Ok(affected > 0)
    }

    // ==========================================
    // Semaines
    // ==========================================

    pub fn create_week(&self, week: &Week) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO week (week_id, label, created_at) VALUES (?1, ?2, ?3)",
            params![
                week.week_id,
                week.label,
                week.created_at.format(TS_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    pub fn find_week(&self, week_id: &str) -> RepositoryResult<Option<Week>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT week_id, label, created_at FROM week WHERE week_id = ?1")?;
        let mut rows = stmt.query_map(params![week_id], |row| {
            Ok(Week {
                week_id: row.get(0)?,
                label: row.get(1)?,
                created_at: parse_ts(row, 2)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    pub fn list_weeks(&self) -> RepositoryResult<Vec<Week>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT week_id, label, created_at FROM week ORDER BY week_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Week {
                week_id: row.get(0)?,
                label: row.get(1)?,
                created_at: parse_ts(row, 2)?,
            })
        })?;
        let mut weeks = Vec::new();
        for row in rows {
            weeks.push(row?);
        }
        Ok(weeks)
    }

    // ==========================================
    // Références produit
    // ==========================================

    pub fn create_reference(&self, reference: &ProductReference) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO product_reference (reference_id, line_id, designation, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                reference.reference_id,
                reference.line_id,
                reference.designation,
                reference.created_at.format(TS_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    pub fn find_reference(&self, reference_id: &str) -> RepositoryResult<Option<ProductReference>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT reference_id, line_id, designation, created_at
            FROM product_reference WHERE reference_id = ?1
            "#,
        )?;
        let mut rows = stmt.query_map(params![reference_id], |row| {
            Ok(ProductReference {
                reference_id: row.get(0)?,
                line_id: row.get(1)?,
                designation: row.get(2)?,
                created_at: parse_ts(row, 3)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Références produites par une ligne (ordre stable pour l'affichage)
    pub fn list_references_for_line(
        &self,
        line_id: &str,
    ) -> RepositoryResult<Vec<ProductReference>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT reference_id, line_id, designation, created_at
            FROM product_reference WHERE line_id = ?1
            ORDER BY reference_id
            "#,
        )?;
        let rows = stmt.query_map(params![line_id], |row| {
            Ok(ProductReference {
                reference_id: row.get(0)?,
                line_id: row.get(1)?,
                designation: row.get(2)?,
                created_at: parse_ts(row, 3)?,
            })
        })?;
        let mut references = Vec::new();
        for row in rows {
            references.push(row?);
        }
        Ok(references)
    }

    pub fn delete_reference(&self, reference_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM product_reference WHERE reference_id = ?1",
            params![reference_id],
        )?;
        Ok(affected > 0)
    }

    // ==========================================
    // Personnel
    // ==========================================

    pub fn create_worker(&self, worker: &Worker) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO worker (worker_id, name, badge_no, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                worker.worker_id,
                worker.name,
                worker.badge_no,
                worker.created_at.format(TS_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    pub fn list_workers(&self) -> RepositoryResult<Vec<Worker>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT worker_id, name, badge_no, created_at FROM worker ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Worker {
                worker_id: row.get(0)?,
                name: row.get(1)?,
                badge_no: row.get(2)?,
                created_at: parse_ts(row, 3)?,
            })
        })?;
        let mut workers = Vec::new();
        for row in rows {
            workers.push(row?);
        }
        Ok(workers)
    }

    pub fn delete_worker(&self, worker_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected =
            conn.execute("DELETE FROM worker WHERE worker_id = ?1", params![worker_id])?;
        Ok(affected > 0)
    }

    // ==========================================
    // Phases
    // ==========================================

    pub fn create_phase(&self, phase: &Phase) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO phase (phase_id, label, created_at) VALUES (?1, ?2, ?3)",
            params![
                phase.phase_id,
                phase.label,
                phase.created_at.format(TS_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    pub fn list_phases(&self) -> RepositoryResult<Vec<Phase>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT phase_id, label, created_at FROM phase ORDER BY label")?;
        let rows = stmt.query_map([], |row| {
            Ok(Phase {
                phase_id: row.get(0)?,
                label: row.get(1)?,
                created_at: parse_ts(row, 2)?,
            })
        })?;
        let mut phases = Vec::new();
        for row in rows {
            phases.push(row?);
        }
        Ok(phases)
    }

    pub fn delete_phase(&self, phase_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM phase WHERE phase_id = ?1", params![phase_id])?;
        Ok(affected > 0)
    }

    // ==========================================
    // Horaires
    // ==========================================

    pub fn create_time_slot(&self, slot: &TimeSlot) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO time_slot (slot_id, label, start_time, end_time, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                slot.slot_id,
                slot.label,
                slot.start_time,
                slot.end_time,
                slot.created_at.format(TS_FORMAT).to_string()
            ],
        )?;
        Ok(())
    }

    pub fn list_time_slots(&self) -> RepositoryResult<Vec<TimeSlot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT slot_id, label, start_time, end_time, created_at FROM time_slot ORDER BY start_time",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TimeSlot {
                slot_id: row.get(0)?,
                label: row.get(1)?,
                start_time: row.get(2)?,
                end_time: row.get(3)?,
                created_at: parse_ts(row, 4)?,
            })
        })?;
        let mut slots = Vec::new();
        for row in rows {
            slots.push(row?);
        }
        Ok(slots)
    }

    pub fn delete_time_slot(&self, slot_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected =
            conn.execute("DELETE FROM time_slot WHERE slot_id = ?1", params![slot_id])?;
        Ok(affected > 0)
    }
}
