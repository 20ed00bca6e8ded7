// ==========================================
// Tests d'intégration CauseApi
// ==========================================
// Périmètre:
// 1. Soumission: validation contre l'écart vivant, rôle, remplacement
// 2. Consultation: pré-remplissage de la modale
// 3. Variante détaillée matière première
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use suivi_prod::api::ApiError;
use suivi_prod::domain::non_conformity::{CauseBuckets, NonConformityKey, RawMaterialItem};
use suivi_prod::domain::planning::PlanningKey;
use suivi_prod::domain::types::{Day, Role};

/// Grille amorcée + écart de 250 sur (lundi, REF-100)
fn env_with_gap() -> (ApiTestEnv, String, NonConformityKey) {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();
    env.planning_api
        .set_quantities(
            &PlanningKey::new("semaine48", &line_id, Day::Lundi, "REF-100"),
            1000,
            None,
            750,
            750,
        )
        .expect("mise en place de l'écart");
    let key = NonConformityKey::new("semaine48", Day::Lundi, &line_id, "REF-100");
    (env, line_id, key)
}

// ==========================================
// Soumission
// ==========================================

#[test]
fn test_submit_causes_attribution_partielle() {
    let (env, _line_id, key) = env_with_gap();

    let result = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                raw_material: 100,
                absence: 50,
                ..Default::default()
            },
            Some("rupture d'approvisionnement".to_string()),
            "superviseur1",
            Role::User,
        )
        .expect("soumission refusée");

    assert_eq!(result.record.total_5m, 150);
    assert_eq!(result.remainder, 100);
    assert_eq!(result.record.declared_by, "superviseur1");
}

#[test]
fn test_submit_causes_sur_attribution() {
    let (env, _line_id, key) = env_with_gap();

    let err = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                raw_material: 300,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::CauseOverAttribution {
            total_5m: 300,
            gap: 250
        }
    ));
}

#[test]
fn test_submit_causes_ecart_nul() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();
    // plan = déclaration: rien à expliquer
    env.planning_api
        .set_quantities(
            &PlanningKey::new("semaine48", &line_id, Day::Lundi, "REF-100"),
            500,
            None,
            500,
            500,
        )
        .expect("quantités");

    let key = NonConformityKey::new("semaine48", Day::Lundi, &line_id, "REF-100");
    let err = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                absence: 1,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::CauseOverAttribution { gap: 0, .. }));
}

#[test]
fn test_submit_causes_soumission_vide() {
    let (env, _line_id, key) = env_with_gap();

    let err = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets::default(),
            None,
            "superviseur1",
            Role::User,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::EmptyCauses));
}

#[test]
fn test_submit_causes_role_admin_refuse() {
    let (env, _line_id, key) = env_with_gap();

    let err = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                absence: 10,
                ..Default::default()
            },
            None,
            "admin1",
            Role::Admin,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_submit_causes_case_inexistante() {
    let env = ApiTestEnv::new().expect("environnement de test");
    let line_id = env.seed_week_line();

    let key = NonConformityKey::new("semaine48", Day::Lundi, &line_id, "REF-999");
    let err = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                absence: 10,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_submit_causes_remplacement_complet() {
    let (env, _line_id, key) = env_with_gap();

    env.cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                raw_material: 10,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .expect("première soumission");

    // nouvelle soumission: remplacement, pas de fusion
    let result = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                absence: 5,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .expect("seconde soumission");

    assert_eq!(result.record.buckets.raw_material, 0);
    assert_eq!(result.record.buckets.absence, 5);
    assert_eq!(result.record.total_5m, 5);

    let stored = env
        .cause_api
        .get_causes(&key)
        .expect("relecture")
        .expect("enregistrement absent");
    assert_eq!(stored.buckets.raw_material, 0);
    assert_eq!(stored.buckets.absence, 5);
}

#[test]
fn test_submit_causes_conserve_created_at() {
    let (env, _line_id, key) = env_with_gap();

    let first = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                raw_material: 10,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .expect("première soumission");

    let second = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                absence: 5,
                ..Default::default()
            },
            None,
            "superviseur2",
            Role::User,
        )
        .expect("seconde soumission");

    assert_eq!(second.record.created_at, first.record.created_at);
    assert_eq!(second.record.declared_by, "superviseur2");
}

// ==========================================
// Variante détaillée matière première
// ==========================================

#[test]
fn test_submit_causes_liste_matiere_premiere() {
    let (env, _line_id, key) = env_with_gap();

    // scalaire incohérent (999): la liste fait foi
    let result = env
        .cause_api
        .submit_causes(
            &key,
            CauseBuckets {
                raw_material: 999,
                raw_material_items: vec![
                    RawMaterialItem {
                        reference: "MAT-A".to_string(),
                        quantity: 120,
                    },
                    RawMaterialItem {
                        reference: "MAT-B".to_string(),
                        quantity: 80,
                    },
                ],
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .expect("soumission détaillée");

    assert_eq!(result.record.buckets.raw_material, 200);
    assert_eq!(result.record.total_5m, 200);
    assert_eq!(result.remainder, 50);

    // la liste survit à l'aller-retour base (colonne JSON)
    let stored = env
        .cause_api
        .get_causes(&key)
        .expect("relecture")
        .expect("enregistrement absent");
    assert_eq!(stored.buckets.raw_material_items.len(), 2);
    assert_eq!(stored.buckets.raw_material_items[0].reference, "MAT-A");
}

// ==========================================
// Consultation
// ==========================================

#[test]
fn test_get_causes_avant_toute_declaration() {
    let (env, _line_id, key) = env_with_gap();

    // aucune déclaration: None, pas une erreur
    let result = env.cause_api.get_causes(&key).expect("consultation");
    assert!(result.is_none());
}
