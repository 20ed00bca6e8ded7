// ==========================================
// Tests d'intégration PlanningApi
// ==========================================
// Périmètre:
// 1. Initialisation de grille: init_week
// 2. Quantités: set_quantities + recalcul delta_percent
// 3. Propagations: set_operator_count, set_work_order
// 4. Etat de case: get_entry_status
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use suivi_prod::api::ApiError;
use suivi_prod::domain::non_conformity::{CauseBuckets, NonConformityKey};
use suivi_prod::domain::planning::PlanningKey;
use suivi_prod::domain::types::{Day, EntryState, Role};

// ==========================================
// Initialisation de grille
// ==========================================

#[test]
fn test_init_week_cree_la_grille_complete() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    // 2 références x 7 jours
    let entries = env
        .planning_api
        .get_week("semaine48", &line_id)
        .expect("lecture grille");
    assert_eq!(entries.len(), 14);
    assert!(entries.iter().all(|e| e.planned_qty == 0
        && e.production_declared == 0
        && e.modified_qty.is_none()
        && e.delta_percent == 0));
}

#[test]
fn test_init_week_idempotente() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    // seconde initialisation: aucune case créée, grille intacte
    let created = env
        .planning_api
        .init_week("semaine48", &line_id)
        .expect("seconde initialisation");
    assert_eq!(created, 0);
    assert_eq!(
        env.planning_api
            .get_week("semaine48", &line_id)
            .expect("lecture grille")
            .len(),
        14
    );
}

#[test]
fn test_init_week_semaine_inconnue() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    let err = env
        .planning_api
        .init_week("semaine99", &line_id)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_init_week_ligne_sans_reference() {
    let env = ApiTestEnv::new().expect("environnement de test");
    env.registry_api
        .create_week("semaine50", "Semaine 50")
        .expect("création semaine");
    let line = env
        .registry_api
        .create_line("Ligne vide", None)
        .expect("création ligne");

    let err = env
        .planning_api
        .init_week("semaine50", &line.line_id)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

// ==========================================
// Quantités
// ==========================================

#[test]
fn test_set_quantities_recalcule_delta() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();
    let key = PlanningKey::new("semaine48", &line_id, Day::Lundi, "REF-100");

    let entry = env
        .planning_api
        .set_quantities(&key, 1000, None, 750, 740)
        .expect("mise à jour quantités");
    assert_eq!(entry.delta_percent, 75);
    assert_eq!(entry.magasin_declared, 740);

    // M prioritaire: 750/800 -> 94
    let entry = env
        .planning_api
        .set_quantities(&key, 1000, Some(800), 750, 740)
        .expect("mise à jour avec M");
    assert_eq!(entry.delta_percent, 94);

    // relecture depuis la base: valeur persistée
    let stored = env
        .planning_api
        .get_entry(&key)
        .expect("relecture case");
    assert_eq!(stored.delta_percent, 94);
    assert_eq!(stored.modified_qty, Some(800));
}

#[test]
fn test_get_entry_case_inexistante() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();
    let key = PlanningKey::new("semaine48", &line_id, Day::Lundi, "REF-999");

    let err = env.planning_api.get_entry(&key).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ==========================================
// Propagation effectif opérateurs
// ==========================================

#[test]
fn test_set_operator_count_propage_aux_references_du_jour() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    let affected = env
        .planning_api
        .set_operator_count("semaine48", &line_id, Day::Mardi, 6)
        .expect("propagation effectif");
    assert_eq!(affected, 2);

    for reference in ["REF-100", "REF-200"] {
        let entry = env
            .planning_api
            .get_entry(&PlanningKey::new("semaine48", &line_id, Day::Mardi, reference))
            .expect("relecture case");
        assert_eq!(entry.operator_count, 6);
    }
    // les autres jours restent à zéro
    let entry = env
        .planning_api
        .get_entry(&PlanningKey::new("semaine48", &line_id, Day::Lundi, "REF-100"))
        .expect("relecture case");
    assert_eq!(entry.operator_count, 0);
}

#[test]
fn test_set_operator_count_idempotent() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    env.planning_api
        .set_operator_count("semaine48", &line_id, Day::Mardi, 6)
        .expect("première propagation");
    let affected = env
        .planning_api
        .set_operator_count("semaine48", &line_id, Day::Mardi, 6)
        .expect("seconde propagation");
    assert_eq!(affected, 0);
}

#[test]
fn test_set_operator_count_hors_bornes() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    let err = env
        .planning_api
        .set_operator_count("semaine48", &line_id, Day::Mardi, 51)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_set_operator_count_grille_absente() {
    let env = ApiTestEnv::new().expect("environnement de test");
    env.seed_week_line();

    let err = env
        .planning_api
        .set_operator_count("semaine48", "ligne-inconnue", Day::Mardi, 6)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ==========================================
// Propagation OF
// ==========================================

#[test]
fn test_set_work_order_propage_a_tous_les_jours() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    let affected = env
        .planning_api
        .set_work_order("semaine48", &line_id, "REF-100", "OF-2024-881")
        .expect("propagation OF");
    assert_eq!(affected, 7);

    // aller-retour: chaque jour de REF-100 porte l'OF, REF-200 aucun
    for day in Day::ALL {
        let entry = env
            .planning_api
            .get_entry(&PlanningKey::new("semaine48", &line_id, day, "REF-100"))
            .expect("relecture case");
        assert_eq!(entry.work_order_ref.as_deref(), Some("OF-2024-881"));

        let other = env
            .planning_api
            .get_entry(&PlanningKey::new("semaine48", &line_id, day, "REF-200"))
            .expect("relecture case");
        assert!(other.work_order_ref.is_none());
    }
}

#[test]
fn test_set_work_order_reference_absente() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    let err = env
        .planning_api
        .set_work_order("semaine48", &line_id, "REF-999", "OF-1")
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ==========================================
// Etat de case
// ==========================================

#[test]
fn test_get_entry_status_suit_le_cycle() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();
    let key = PlanningKey::new("semaine48", &line_id, Day::Lundi, "REF-100");

    // grille vierge -> Unplanned
    let status = env.planning_api.get_entry_status(&key).expect("état");
    assert_eq!(status.state, EntryState::Unplanned);
    assert_eq!(status.gap, 0);

    // plan saisi -> Planned
    env.planning_api
        .set_quantities(&key, 1000, None, 0, 0)
        .expect("plan");
    let status = env.planning_api.get_entry_status(&key).expect("état");
    assert_eq!(status.state, EntryState::Planned);

    // déclaration avec écart -> CausesRequired
    env.planning_api
        .set_quantities(&key, 1000, None, 750, 750)
        .expect("déclaration");
    let status = env.planning_api.get_entry_status(&key).expect("état");
    assert_eq!(status.state, EntryState::CausesRequired);
    assert_eq!(status.gap, 250);

    // causes attribuées -> CausesAttributed
    let nc_key = NonConformityKey::new("semaine48", Day::Lundi, &line_id, "REF-100");
    env.cause_api
        .submit_causes(
            &nc_key,
            CauseBuckets {
                raw_material: 250,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .expect("soumission causes");
    let status = env.planning_api.get_entry_status(&key).expect("état");
    assert_eq!(status.state, EntryState::CausesAttributed);

    // la déclaration est corrigée, l'attribution devient périmée
    env.planning_api
        .set_quantities(&key, 1000, None, 900, 900)
        .expect("correction déclaration");
    let status = env.planning_api.get_entry_status(&key).expect("état");
    assert_eq!(status.state, EntryState::CausesRequired);
    assert_eq!(status.gap, 100);
}
