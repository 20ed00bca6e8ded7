// ==========================================
// Suivi Production - Modèle de non-conformité (causes 5M)
// ==========================================
// Un enregistrement par (semaine, jour, ligne, référence) au plus
// (sémantique upsert: une nouvelle soumission remplace la précédente).
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::Day;

// ==========================================
// NonConformityKey - clef composite
// ==========================================
// Ordre des champs aligné sur la clef des écrans causes: semaine,
// jour, ligne, référence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonConformityKey {
    pub week_id: String,
    pub day: Day,
    pub line_id: String,
    pub reference_id: String,
}

impl NonConformityKey {
    pub fn new(week_id: &str, day: Day, line_id: &str, reference_id: &str) -> Self {
        Self {
            week_id: week_id.to_string(),
            day,
            line_id: line_id.to_string(),
            reference_id: reference_id.to_string(),
        }
    }
}

// ==========================================
// RawMaterialItem - détail matière première
// ==========================================
// Variante détaillée du seau matière première: liste de couples
// {référence matière, quantité} dont la somme vaut le seau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterialItem {
    pub reference: String,
    pub quantity: u32,
}

// ==========================================
// CauseBuckets - les cinq seaux 5M
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseBuckets {
    pub raw_material: u32,
    // Si non vide, la liste fait foi: le scalaire raw_material est
    // recalculé depuis la somme de la liste (voir normalize).
    #[serde(default)]
    pub raw_material_items: Vec<RawMaterialItem>,
    pub absence: u32,
    pub yield_loss: u32,
    pub maintenance: u32,
    pub quality: u32,
}

impl CauseBuckets {
    /// Recalcule le scalaire matière première depuis la liste détaillée.
    /// Règle: si les deux sont fournis et divergent, la liste gagne.
    pub fn normalize(&mut self) {
        if !self.raw_material_items.is_empty() {
            self.raw_material = self
                .raw_material_items
                .iter()
                .fold(0u32, |acc, i| acc.saturating_add(i.quantity));
        }
    }

    /// Somme des cinq seaux (après normalisation de l'appelant)
    ///
    /// Somme saturée: les seaux viennent de l'appelant sans borne
    /// haute, et un total saturé à u32::MAX échoue de toute façon la
    /// règle de surattribution (jamais de débordement silencieux).
    pub fn total_5m(&self) -> u32 {
        [
            self.raw_material,
            self.absence,
            self.yield_loss,
            self.maintenance,
            self.quality,
        ]
        .into_iter()
        .fold(0u32, |acc, v| acc.saturating_add(v))
    }

    /// Vrai si aucun seau n'attribue la moindre unité
    pub fn is_empty(&self) -> bool {
        self.total_5m() == 0
    }
}

// ==========================================
// NonConformityRecord - enregistrement causes 5M
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonConformityRecord {
    pub key: NonConformityKey,
    pub buckets: CauseBuckets,
    pub total_5m: u32, // dérivé: somme des seaux, figé à l'enregistrement
    pub comment: Option<String>,
    pub declared_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NonConformityRecord {
    pub fn new(
        key: NonConformityKey,
        mut buckets: CauseBuckets,
        comment: Option<String>,
        declared_by: &str,
        now: NaiveDateTime,
    ) -> Self {
        buckets.normalize();
        let total_5m = buckets.total_5m();
        Self {
            key,
            buckets,
            total_5m,
            comment,
            declared_by: declared_by.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
