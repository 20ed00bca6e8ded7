// ==========================================
// Suivi Production - Bibliothèque coeur
// ==========================================
// Suivi de production en atelier: planification hebdomadaire par
// ligne, déclarations de production, réconciliation des écarts et
// causes 5M.
// Pile: Rust + SQLite; la couche HTTP consomme la couche api.
// ==========================================

// ==========================================
// Déclaration des modules
// ==========================================

// Couche domaine - entités et types
pub mod domain;

// Couche repository - accès aux données
pub mod repository;

// Couche moteur - règles métier
pub mod engine;

// Couche configuration
pub mod config;

// Infrastructure base de données (connexion / PRAGMA / schéma)
pub mod db;

// Journalisation
pub mod logging;

// Couche API - interfaces métier
pub mod api;

// Couche application - câblage
pub mod app;

// ==========================================
// Réexport des types principaux
// ==========================================

// Types du domaine
pub use domain::types::{CauseCategory, Day, EntryState, Role};

// Entités du domaine
pub use domain::{
    CauseBuckets, NonConformityKey, NonConformityRecord, Phase, PlanningEntry, PlanningKey,
    ProductReference, ProductionLine, RawMaterialItem, TimeSlot, Week, Worker,
};

// Moteurs
pub use engine::{
    CauseValidation, PropagationEngine, ReconciliationEngine, ReconciliationError,
};

// API
pub use api::{CauseApi, PlanningApi, RegistryApi, ReportApi, StatsApi};

// ==========================================
// Constantes système
// ==========================================

// Version du système
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nom du système
pub const APP_NAME: &str = "Suivi Production";
