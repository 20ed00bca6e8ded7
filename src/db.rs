// ==========================================
// Suivi Production - Initialisation SQLite
// ==========================================
// Objectifs:
// - Unifier le comportement PRAGMA de toutes les connexions
//   (éviter "clés étrangères actives dans un module, pas l'autre")
// - Unifier le busy_timeout pour limiter les erreurs busy
// - Porter le schéma complet (CREATE TABLE IF NOT EXISTS, idempotent)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout par défaut (millisecondes)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configure les PRAGMA unifiés d'une connexion SQLite
///
/// Note: foreign_keys et busy_timeout doivent être posés
/// connexion par connexion.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Ouvre une connexion SQLite avec la configuration unifiée
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Schéma complet de la base (idempotent)
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS production_line (
    line_id     TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS week (
    week_id    TEXT PRIMARY KEY,
    label      TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS product_reference (
    reference_id TEXT PRIMARY KEY,
    line_id      TEXT NOT NULL REFERENCES production_line(line_id),
    designation  TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS worker (
    worker_id  TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    badge_no   TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS phase (
    phase_id   TEXT PRIMARY KEY,
    label      TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS time_slot (
    slot_id    TEXT PRIMARY KEY,
    label      TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time   TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS planning_entry (
    week_id              TEXT NOT NULL,
    line_id              TEXT NOT NULL,
    day                  TEXT NOT NULL,
    reference_id         TEXT NOT NULL,
    planned_qty          INTEGER NOT NULL DEFAULT 0,
    modified_qty         INTEGER,
    production_declared  INTEGER NOT NULL DEFAULT 0,
    magasin_declared     INTEGER NOT NULL DEFAULT 0,
    operator_count       INTEGER NOT NULL DEFAULT 0,
    work_order_ref       TEXT,
    delta_percent        INTEGER NOT NULL DEFAULT 0,
    updated_at           TEXT NOT NULL,
    PRIMARY KEY (week_id, line_id, day, reference_id)
);

CREATE TABLE IF NOT EXISTS non_conformity (
    week_id                 TEXT NOT NULL,
    day                     TEXT NOT NULL,
    line_id                 TEXT NOT NULL,
    reference_id            TEXT NOT NULL,
    raw_material_qty        INTEGER NOT NULL DEFAULT 0,
    raw_material_items_json TEXT,
    absence_qty             INTEGER NOT NULL DEFAULT 0,
    yield_loss_qty          INTEGER NOT NULL DEFAULT 0,
    maintenance_qty         INTEGER NOT NULL DEFAULT 0,
    quality_qty             INTEGER NOT NULL DEFAULT 0,
    total_5m                INTEGER NOT NULL DEFAULT 0,
    comment                 TEXT,
    declared_by             TEXT NOT NULL,
    created_at              TEXT NOT NULL,
    updated_at              TEXT NOT NULL,
    PRIMARY KEY (week_id, day, line_id, reference_id)
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key      TEXT NOT NULL,
    value    TEXT NOT NULL,
    PRIMARY KEY (scope_id, key)
);
"#;

/// Crée les tables manquantes (appelé au démarrage et par les tests)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
