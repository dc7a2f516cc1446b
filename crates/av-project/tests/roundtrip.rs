use av_project::schema::*;
use av_project::{load, load_json, load_yaml, save, save_json, save_yaml, validate_scenario};

fn sample_scenario() -> Scenario {
    Scenario {
        version: 1,
        name: "Roundtrip".to_string(),
        studies: vec![
            StudyDef {
                id: "v1".to_string(),
                name: "Delta Cephei".to_string(),
                kind: StudyKind::VariableStar {
                    period_days: 72.0,
                    max_brightness: 8.0,
                    min_brightness: 4.0,
                    variant: Some("RR Lyrae".to_string()),
                    periods: 2.0,
                    step_days: 0.1,
                },
            },
            StudyDef {
                id: "hr".to_string(),
                name: "Sun".to_string(),
                kind: StudyKind::StellarEvolution {
                    mass_msun: 1.0,
                    mode: EvolutionModeDef::Exponential,
                    samples: 100,
                },
            },
            StudyDef {
                id: "rv".to_string(),
                name: "System".to_string(),
                kind: StudyKind::PlanetarySystem {
                    star_mass_msun: 1.0,
                    presets: vec!["Planet B".to_string()],
                    planets: vec![PlanetDef {
                        tag: "Custom".to_string(),
                        mass: 0.5,
                        period_days: 7.0,
                        semi_major_axis_au: 0.07,
                    }],
                    duration_days: 20.0,
                    samples: 1000,
                },
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_scenario() {
    let scenario = Scenario {
        version: 1,
        name: "Empty".to_string(),
        studies: vec![],
    };
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("av_project_roundtrip_empty.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_yaml_all_study_kinds() {
    let scenario = sample_scenario();
    let path = std::env::temp_dir().join("av_project_roundtrip_all.yaml");
    save_yaml(&path, &scenario).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), scenario);
}

#[test]
fn roundtrip_json_all_study_kinds() {
    let scenario = sample_scenario();
    let path = std::env::temp_dir().join("av_project_roundtrip_all.json");
    save_json(&path, &scenario).unwrap();
    assert_eq!(load_json(&path).unwrap(), scenario);
}

#[test]
fn load_dispatches_on_extension() {
    let scenario = sample_scenario();
    let dir = std::env::temp_dir();

    let yml = dir.join("av_project_dispatch.yml");
    save(&yml, &scenario).unwrap();
    assert_eq!(load(&yml).unwrap(), scenario);

    let txt = dir.join("av_project_dispatch.txt");
    assert!(save(&txt, &scenario).is_err());
    assert!(load(&txt).is_err());
}

#[test]
fn missing_fields_take_defaults() {
    let yaml = r#"
version: 1
name: Defaults
studies:
  - id: v
    name: Star
    kind:
      type: VariableStar
      period_days: 10.0
      max_brightness: 2.0
      min_brightness: 1.0
  - id: rv
    name: Bare
    kind:
      type: PlanetarySystem
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    validate_scenario(&scenario).unwrap();

    match &scenario.studies[0].kind {
        StudyKind::VariableStar {
            variant,
            periods,
            step_days,
            ..
        } => {
            assert_eq!(*variant, None);
            assert_eq!(*periods, 2.0);
            assert_eq!(*step_days, 0.1);
        }
        other => panic!("unexpected kind {other:?}"),
    }
    match &scenario.studies[1].kind {
        StudyKind::PlanetarySystem {
            star_mass_msun,
            presets,
            planets,
            duration_days,
            samples,
        } => {
            assert_eq!(*star_mass_msun, 1.0);
            assert!(presets.is_empty() && planets.is_empty());
            assert_eq!(*duration_days, 20.0);
            assert_eq!(*samples, 1000);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn invalid_scenario_is_not_saved() {
    let mut scenario = sample_scenario();
    scenario.studies[0].id = "hr".to_string();
    let path = std::env::temp_dir().join("av_project_invalid.yaml");
    assert!(save_yaml(&path, &scenario).is_err());
}
