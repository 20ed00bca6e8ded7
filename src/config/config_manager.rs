// ==========================================
// Suivi Production - Gestionnaire de configuration
// ==========================================
// Stockage: table config_kv (scope + clef + valeur).
// Les bornes de réconciliation sont configurables; les défauts
// reflètent la règle métier (effectif 0..=50, tolérance 1 unité).
// ==========================================

use std::error::Error;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use crate::db::open_sqlite_connection;
use crate::engine::{DEFAULT_CAUSE_TOLERANCE, DEFAULT_OPERATOR_COUNT_MAX};

// ==========================================
// Clefs de configuration
// ==========================================
pub mod config_keys {
    /// Borne haute de l'effectif opérateurs par équipe
    pub const OPERATOR_COUNT_MAX: &str = "reconciliation/operator_count_max";
    /// Tolérance entre somme des causes et écart (unités)
    pub const CAUSE_TOLERANCE: &str = "reconciliation/cause_tolerance";
}

// ==========================================
// ConfigManager - gestionnaire de configuration
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Crée un gestionnaire sur une connexion partagée
    ///
    /// Les PRAGMA unifiés sont réappliqués (idempotent) pour garantir
    /// un comportement identique quelle que soit la provenance.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let guard = conn
                .lock()
                .map_err(|e| format!("verrou connexion: {}", e))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    /// Lit une valeur du scope global
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("verrou connexion: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Ecrit une valeur dans le scope global (upsert)
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| format!("verrou connexion: {}", e))?;
        conn.execute(
            "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Lit un entier non signé, valeur par défaut si absent ou illisible
    fn get_u32_or(&self, key: &str, default: u32) -> u32 {
        match self.get_config_value(key) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, raw = %raw, "valeur de configuration illisible, défaut appliqué");
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "lecture configuration en échec, défaut appliqué");
                default
            }
        }
    }

    /// Borne haute de l'effectif opérateurs (défaut: 50)
    pub fn operator_count_max(&self) -> u32 {
        self.get_u32_or(config_keys::OPERATOR_COUNT_MAX, DEFAULT_OPERATOR_COUNT_MAX)
    }

    /// Tolérance causes/écart (défaut: 1 unité)
    pub fn cause_tolerance(&self) -> u32 {
        self.get_u32_or(config_keys::CAUSE_TOLERANCE, DEFAULT_CAUSE_TOLERANCE)
    }
}
