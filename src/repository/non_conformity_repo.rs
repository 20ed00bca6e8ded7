// ==========================================
// Suivi Production - Repository non-conformités (causes 5M)
// ==========================================
// Sémantique upsert: remplacement complet des seaux, jamais
// d'addition. Au plus un enregistrement actif par clef.
// ==========================================

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::open_sqlite_connection;
use crate::domain::non_conformity::{
    CauseBuckets, NonConformityKey, NonConformityRecord, RawMaterialItem,
};
use crate::domain::types::Day;
use crate::repository::error::{RepositoryError, RepositoryResult};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// NonConformityRepository - table non_conformity
// ==========================================
pub struct NonConformityRepository {
    conn: Arc<Mutex<Connection>>,
}

impl NonConformityRepository {
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

    /// Recherche par clef (pré-remplissage de la modale causes)
    ///
    /// # Retour
    /// - Ok(None): pas encore de causes pour cette clef (cas attendu)
    pub fn get(&self, key: &NonConformityKey) -> RepositoryResult<Option<NonConformityRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT week_id, day, line_id, reference_id,
                   raw_material_qty, raw_material_items_json,
                   absence_qty, yield_loss_qty, maintenance_qty, quality_qty,
                   total_5m, comment, declared_by, created_at, updated_at
            FROM non_conformity
            WHERE week_id = ?1 AND day = ?2 AND line_id = ?3 AND reference_id = ?4
            "#,
        )?;

        let mut rows = stmt.query_map(
            params![key.week_id, key.day.as_str(), key.line_id, key.reference_id],
            Self::map_row,
        )?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Tous les enregistrements d'un couple (semaine, ligne) - agrégats 5M
    pub fn get_all_for_week_line(
        &self,
        week_id: &str,
        line_id: &str,
    ) -> RepositoryResult<Vec<NonConformityRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT week_id, day, line_id, reference_id,
                   raw_material_qty, raw_material_items_json,
                   absence_qty, yield_loss_qty, maintenance_qty, quality_qty,
                   total_5m, comment, declared_by, created_at, updated_at
            FROM non_conformity
            WHERE week_id = ?1 AND line_id = ?2
            "#,
        )?;

        let rows = stmt.query_map(params![week_id, line_id], Self::map_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        // Tri calendaire en Rust: la colonne day en TEXT trierait
        // dimanche en tête.
        records.sort_by(|a, b| {
            a.key
                .day
                .cmp(&b.key.day)
                .then_with(|| a.key.reference_id.cmp(&b.key.reference_id))
        });
        Ok(records)
    }

    /// Remplace (ou crée) l'enregistrement de la clef et retourne l'état stocké
    ///
    /// created_at de l'enregistrement précédent est conservé;
    /// updated_at prend l'horodatage de la soumission. Idempotent:
    /// soumettre deux fois le même enregistrement donne le même état.
    pub fn upsert(&self, record: &NonConformityRecord) -> RepositoryResult<NonConformityRecord> {
        let existing_created_at = self.get(&record.key)?.map(|r| r.created_at);

        let mut stored = record.clone();
        if let Some(created_at) = existing_created_at {
            stored.created_at = created_at;
        }

        let items_json = if stored.buckets.raw_material_items.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&stored.buckets.raw_material_items)?)
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO non_conformity (
                week_id, day, line_id, reference_id,
                raw_material_qty, raw_material_items_json,
                absence_qty, yield_loss_qty, maintenance_qty, quality_qty,
                total_5m, comment, declared_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                stored.key.week_id,
                stored.key.day.as_str(),
                stored.key.line_id,
                stored.key.reference_id,
                stored.buckets.raw_material,
                items_json,
                stored.buckets.absence,
                stored.buckets.yield_loss,
                stored.buckets.maintenance,
                stored.buckets.quality,
                stored.total_5m,
                stored.comment,
                stored.declared_by,
                stored.created_at.format(TS_FORMAT).to_string(),
                stored.updated_at.format(TS_FORMAT).to_string(),
            ],
        )?;

        Ok(stored)
    }

    /// Supprime l'enregistrement d'une clef (opération d'effacement,
    /// distincte de la soumission de causes)
    pub fn delete(&self, key: &NonConformityKey) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            DELETE FROM non_conformity
            WHERE week_id = ?1 AND day = ?2 AND line_id = ?3 AND reference_id = ?4
            "#,
            params![key.week_id, key.day.as_str(), key.line_id, key.reference_id],
        )?;
        Ok(affected > 0)
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<NonConformityRecord> {
        let day_str: String = row.get(1)?;
        let day = Day::from_str(&day_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })?;

        let items_json: Option<String> = row.get(5)?;
        let raw_material_items: Vec<RawMaterialItem> = match items_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            None => Vec::new(),
        };

        let created_at = Self::parse_ts(row, 13)?;
        let updated_at = Self::parse_ts(row, 14)?;

        Ok(NonConformityRecord {
            key: NonConformityKey {
                week_id: row.get(0)?,
                day,
                line_id: row.get(2)?,
                reference_id: row.get(3)?,
            },
            buckets: CauseBuckets {
                raw_material: row.get(4)?,
                raw_material_items,
                absence: row.get(6)?,
                yield_loss: row.get(7)?,
                maintenance: row.get(8)?,
                quality: row.get(9)?,
            },
            total_5m: row.get(10)?,
            comment: row.get(11)?,
            declared_by: row.get(12)?,
            created_at,
            updated_at,
        })
    }

    fn parse_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
        let value: String = row.get(idx)?;
        NaiveDateTime::parse_from_str(&value, TS_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    }
}
