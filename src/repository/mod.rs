// ==========================================
// Suivi Production - Couche repository
// ==========================================
// Règle: le repository ne contient pas de logique métier.
// Contrainte: toutes les requêtes paramétrées (pas d'injection SQL).
// ==========================================

pub mod error;
pub mod non_conformity_repo;
pub mod planning_repo;
pub mod registry_repo;

// Réexport des repositories
pub use error::{RepositoryError, RepositoryResult};
pub use non_conformity_repo::NonConformityRepository;
pub use planning_repo::PlanningRepository;
pub use registry_repo::RegistryRepository;
