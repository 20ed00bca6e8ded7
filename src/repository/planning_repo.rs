// ==========================================
// Suivi Production - Repository planification
// ==========================================
// Règle: le repository ne porte aucune logique métier.
// Contrainte: toutes les requêtes paramétrées.
// ==========================================

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::open_sqlite_connection;
use crate::domain::planning::{PlanningEntry, PlanningKey};
use crate::domain::types::Day;
use crate::repository::error::{RepositoryError, RepositoryResult};

/// Format d'horodatage des colonnes TEXT
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// PlanningRepository - table planning_entry
// ==========================================
/// Magasin de planification (interface: get / get_all_for_week_line / save)
pub struct PlanningRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlanningRepository {
    /// Crée un repository sur un fichier base de données
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Crée un repository sur une connexion partagée
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Recherche une case par clef composite
    ///
    /// # Retour
    /// - Ok(Some(entry)): case trouvée
    /// - Ok(None): aucune case pour cette clef (résultat attendu, pas une erreur)
    pub fn get(&self, key: &PlanningKey) -> RepositoryResult<Option<PlanningEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT week_id, line_id, day, reference_id,
                   planned_qty, modified_qty, production_declared, magasin_declared,
                   operator_count, work_order_ref, delta_percent, updated_at
            FROM planning_entry
            WHERE week_id = ?1 AND line_id = ?2 AND day = ?3 AND reference_id = ?4
            "#,
        )?;

        let mut rows = stmt.query_map(
            params![key.week_id, key.line_id, key.day.as_str(), key.reference_id],
            Self::map_row,
        )?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Toutes les cases d'un couple (semaine, ligne), triées jour puis référence
    pub fn get_all_for_week_line(
        &self,
        week_id: &str,
        line_id: &str,
    ) -> RepositoryResult<Vec<PlanningEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT week_id, line_id, day, reference_id,
                   planned_qty, modified_qty, production_declared, magasin_declared,
                   operator_count, work_order_ref, delta_percent, updated_at
            FROM planning_entry
            WHERE week_id = ?1 AND line_id = ?2
            "#,
        )?;

        let rows = stmt.query_map(params![week_id, line_id], Self::map_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        // La colonne day est du TEXT: un ORDER BY SQL rendrait l'ordre
        // alphabétique (dimanche en tête). Le tri calendaire se fait
        // sur l'énumération Day.
        entries.sort_by(|a, b| {
            a.key
                .day
                .cmp(&b.key.day)
                .then_with(|| a.key.reference_id.cmp(&b.key.reference_id))
        });
        Ok(entries)
    }

    /// Vrai si au moins une case existe pour (semaine, ligne)
    pub fn exists_for_week_line(&self, week_id: &str, line_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM planning_entry WHERE week_id = ?1 AND line_id = ?2",
            params![week_id, line_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Ecrit une case (INSERT OR REPLACE sur la clef composite)
    pub fn save(&self, entry: &PlanningEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::save_with(&conn, entry)?;
        Ok(())
    }

    /// Ecrit un lot de cases dans une seule transaction
    ///
    /// Utilisé par l'initialisation de semaine et par les propagations
    /// (operator_count / OF) pour garder l'écriture atomique.
    pub fn save_all(&self, entries: &[PlanningEntry]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for entry in entries {
            Self::save_with(&tx, entry)?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    fn save_with(conn: &Connection, entry: &PlanningEntry) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO planning_entry (
                week_id, line_id, day, reference_id,
                planned_qty, modified_qty, production_declared, magasin_declared,
                operator_count, work_order_ref, delta_percent, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                entry.key.week_id,
                entry.key.line_id,
                entry.key.day.as_str(),
                entry.key.reference_id,
                entry.planned_qty,
                entry.modified_qty,
                entry.production_declared,
                entry.magasin_declared,
                entry.operator_count,
                entry.work_order_ref,
                entry.delta_percent,
                entry.updated_at.format(TS_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<PlanningEntry> {
        let day_str: String = row.get(2)?;
        let day = Day::from_str(&day_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })?;
        let updated_at_str: String = row.get(11)?;
        let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, TS_FORMAT)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    11,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(PlanningEntry {
            key: PlanningKey {
                week_id: row.get(0)?,
                line_id: row.get(1)?,
                day,
                reference_id: row.get(3)?,
            },
            planned_qty: row.get(4)?,
            modified_qty: row.get(5)?,
            production_declared: row.get(6)?,
            magasin_declared: row.get(7)?,
            operator_count: row.get(8)?,
            work_order_ref: row.get(9)?,
            delta_percent: row.get(10)?,
            updated_at,
        })
    }
}
