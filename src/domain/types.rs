// ==========================================
// Suivi Production - Types du domaine
// ==========================================
// Référence: GLOSSAIRE (Ligne / Référence / Semaine / OF / 5M)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Jour de production
// ==========================================
// Clef de planification: une colonne par jour de la semaine.
// Sérialisation: minuscules (alignée avec les clefs REST du front)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl Day {
    /// Les sept jours dans l'ordre de la semaine
    pub const ALL: [Day; 7] = [
        Day::Lundi,
        Day::Mardi,
        Day::Mercredi,
        Day::Jeudi,
        Day::Vendredi,
        Day::Samedi,
        Day::Dimanche,
    ];

    /// Nom du jour tel que stocké en base
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Lundi => "lundi",
            Day::Mardi => "mardi",
            Day::Mercredi => "mercredi",
            Day::Jeudi => "jeudi",
            Day::Vendredi => "vendredi",
            Day::Samedi => "samedi",
            Day::Dimanche => "dimanche",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lundi" => Ok(Day::Lundi),
            "mardi" => Ok(Day::Mardi),
            "mercredi" => Ok(Day::Mercredi),
            "jeudi" => Ok(Day::Jeudi),
            "vendredi" => Ok(Day::Vendredi),
            "samedi" => Ok(Day::Samedi),
            "dimanche" => Ok(Day::Dimanche),
            other => Err(format!("jour inconnu: {}", other)),
        }
    }
}

// ==========================================
// Catégories de causes 5M
// ==========================================
// Règle: cinq catégories fixes, pas de catégorie libre.
// Sérialisation: SCREAMING_SNAKE_CASE (alignée avec la base)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CauseCategory {
    RawMaterial, // Manque matière première
    Absence,     // Absence opérateur
    YieldLoss,   // Perte de rendement
    Maintenance, // Arrêt maintenance
    Quality,     // Rebut qualité
}

impl CauseCategory {
    pub const ALL: [CauseCategory; 5] = [
        CauseCategory::RawMaterial,
        CauseCategory::Absence,
        CauseCategory::YieldLoss,
        CauseCategory::Maintenance,
        CauseCategory::Quality,
    ];

    /// Libellé affiché dans les rapports
    pub fn label(&self) -> &'static str {
        match self {
            CauseCategory::RawMaterial => "Matière première",
            CauseCategory::Absence => "Absence",
            CauseCategory::YieldLoss => "Rendement",
            CauseCategory::Maintenance => "Maintenance",
            CauseCategory::Quality => "Qualité",
        }
    }
}

impl fmt::Display for CauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CauseCategory::RawMaterial => write!(f, "RAW_MATERIAL"),
            CauseCategory::Absence => write!(f, "ABSENCE"),
            CauseCategory::YieldLoss => write!(f, "YIELD_LOSS"),
            CauseCategory::Maintenance => write!(f, "MAINTENANCE"),
            CauseCategory::Quality => write!(f, "QUALITY"),
        }
    }
}

// ==========================================
// Etat d'une case de planification
// ==========================================
// Cycle: Unplanned -> Planned -> Declared -> CausesRequired -> CausesAttributed
// Retour possible vers CausesRequired si les quantités changent après attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryState {
    Unplanned,         // Aucune quantité saisie
    Planned,           // Quantité planifiée, pas encore de déclaration
    Declared,          // Production déclarée, écart nul
    CausesRequired,    // Ecart non nul, causes à attribuer (ou périmées)
    CausesAttributed,  // Causes attribuées (partielles ou complètes)
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryState::Unplanned => write!(f, "UNPLANNED"),
            EntryState::Planned => write!(f, "PLANNED"),
            EntryState::Declared => write!(f, "DECLARED"),
            EntryState::CausesRequired => write!(f, "CAUSES_REQUIRED"),
            EntryState::CausesAttributed => write!(f, "CAUSES_ATTRIBUTED"),
        }
    }
}

// ==========================================
// Rôle de l'appelant
// ==========================================
// Fourni par le collaborateur identité (couche HTTP); le moteur
// de réconciliation lui-même ignore les rôles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}
