// ==========================================
// Suivi Production - Entités référentiel
// ==========================================
// Référentiels: lignes, semaines, références produit, personnel,
// phases, horaires. CRUD pur, pas de logique métier.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionLine - ligne de production
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionLine {
    pub line_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

// ==========================================
// Week - semaine de planification
// ==========================================
// week_id est le nom métier (ex: "semaine48"), pas un UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    pub week_id: String,
    pub label: String,
    pub created_at: NaiveDateTime,
}

// ==========================================
// ProductReference - référence produit (SKU)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReference {
    pub reference_id: String,
    pub line_id: String, // ligne qui produit cette référence
    pub designation: String,
    pub created_at: NaiveDateTime,
}

// ==========================================
// Worker - opérateur / personnel
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub worker_id: String,
    pub name: String,
    pub badge_no: Option<String>,
    pub created_at: NaiveDateTime,
}

// ==========================================
// Phase - phase de production
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub phase_id: String,
    pub label: String,
    pub created_at: NaiveDateTime,
}

// ==========================================
// TimeSlot - horaire d'équipe
// ==========================================
// Heures stockées en texte "HH:MM" (vue registre, aucun calcul dessus).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub slot_id: String,
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: NaiveDateTime,
}
