use kira_myeloclass::engine::derivation::Derivation;
use kira_myeloclass::engine::findings::{ClinicalFindings, PriorTherapy};
use kira_myeloclass::engine::taxonomy::{Family, Taxonomy};
use kira_myeloclass::engine::{classify, rule_table};

fn rich_case() -> ClinicalFindings {
    let mut f = ClinicalFindings {
        blasts_percentage: Some(14.0),
        dysplastic_lineages: Some(2),
        ..Default::default()
    };
    f.mds_related_mutations.set("SRSF2", true);
    f.qualifiers.prior_therapy = PriorTherapy::CytotoxicChemotherapy;
    f.qualifiers.germline_predisposition = vec!["DDX41".to_string()];
    f
}

#[test]
fn classification_is_idempotent() {
    let f = rich_case();
    for taxonomy in Taxonomy::ALL {
        for family in [Family::Aml, Family::Mds] {
            let first = classify(&f, taxonomy, family);
            let second = classify(&f, taxonomy, family);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn precondition_failure_is_one_line() {
    let f = ClinicalFindings::default();
    for taxonomy in Taxonomy::ALL {
        for family in [Family::Aml, Family::Mds] {
            let r = classify(&f, taxonomy, family);
            assert!(r.is_error());
            assert_eq!(r.derivation.len(), 1);
            assert!(r.derivation[0].starts_with("Error: "));
        }
    }
}

#[test]
fn every_rule_appears_once_or_more() {
    let f = rich_case();
    for taxonomy in Taxonomy::ALL {
        for family in [Family::Aml, Family::Mds] {
            let r = classify(&f, taxonomy, family);
            for name in rule_table(taxonomy, family) {
                assert!(
                    r.derivation.iter().any(|s| s.starts_with(name)),
                    "{:?} {:?} missing {}",
                    taxonomy,
                    family,
                    name
                );
            }
        }
    }
}

#[test]
fn reducer_appends_in_order() {
    let log = Derivation::single("a").with("b").with_all(["c", "d"]);
    assert_eq!(log.len(), 4);
    assert_eq!(log.steps(), ["a", "b", "c", "d"]);
    assert!(Derivation::new().is_empty());
    let json = serde_json::to_string(&log).expect("serialize");
    assert_eq!(json, r#"["a","b","c","d"]"#);
}
