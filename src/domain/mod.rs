// ==========================================
// Suivi Production - Couche domaine
// ==========================================
// Entités et types partagés. Règle: aucune dépendance vers les
// couches repository / engine / api.
// ==========================================

pub mod non_conformity;
pub mod planning;
pub mod registry;
pub mod types;

// Réexport des entités principales
pub use non_conformity::{CauseBuckets, NonConformityKey, NonConformityRecord, RawMaterialItem};
pub use planning::{PlanningEntry, PlanningKey};
pub use registry::{Phase, ProductReference, ProductionLine, TimeSlot, Week, Worker};
pub use types::{CauseCategory, Day, EntryState, Role};
