// ==========================================
// Tests d'intégration ReportApi
// ==========================================
// Périmètre: export CSV du tableau hebdomadaire et des causes 5M.
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use suivi_prod::domain::non_conformity::{CauseBuckets, NonConformityKey};
use suivi_prod::domain::planning::PlanningKey;
use suivi_prod::domain::types::{Day, Role};

#[test]
fn test_export_week_csv() {
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
        .expect("quantités");
    env.planning_api
        .set_work_order("semaine48", &line_id, "REF-100", "OF-2024-881")
        .expect("OF");

    let output = tempfile::NamedTempFile::new().expect("fichier de sortie");
    let rows = env
        .report_api
        .export_week_csv("semaine48", &line_id, output.path())
        .expect("export");

    // une ligne par case: 2 références x 7 jours
    assert_eq!(rows, 14);

    let content = std::fs::read_to_string(output.path()).expect("lecture export");
    let mut lines = content.lines();
    let header = lines.next().expect("en-tête");
    assert!(header.starts_with("semaine,ligne,jour,reference,of"));
    assert_eq!(lines.count(), 14);
    // la case renseignée apparaît avec son OF et son delta
    assert!(content.contains("lundi,REF-100,OF-2024-881,1000,750,750,250,75"));
}

#[test]
fn test_export_causes_csv() {
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
        .expect("quantités");
    env.cause_api
        .submit_causes(
            &NonConformityKey::new("semaine48", Day::Lundi, &line_id, "REF-100"),
            CauseBuckets {
                maintenance: 250,
                ..Default::default()
            },
            None,
            "superviseur1",
            Role::User,
        )
        .expect("causes");

    let output = tempfile::NamedTempFile::new().expect("fichier de sortie");
    let rows = env
        .report_api
        .export_causes_csv("semaine48", &line_id, output.path())
        .expect("export");

    // une ligne par catégorie 5M
    assert_eq!(rows, 5);

    let content = std::fs::read_to_string(output.path()).expect("lecture export");
    assert!(content.contains("Maintenance,250,100"));
    assert!(content.contains("Absence,0,0"));
}
