use kira_myeloclass::engine::findings::{PriorTherapy, Qualifiers};
use kira_myeloclass::engine::label::{Category, Qualifier};
use kira_myeloclass::engine::qualifiers::{collect_qualifiers, germline_conditions};
use kira_myeloclass::engine::taxonomy::{Family, Taxonomy, TaxonomyProfile};

#[test]
fn germline_filtering_per_taxonomy() {
    let raw = vec!["TP53 (Li-Fraumeni), Diamond-Blackfan anemia".to_string()];

    let (who, _) = germline_conditions(&raw, TaxonomyProfile::who_2022());
    assert_eq!(who, vec!["TP53 (Li-Fraumeni)".to_string()]);

    let (icc, _) = germline_conditions(&raw, TaxonomyProfile::icc_2022());
    assert_eq!(
        icc,
        vec![
            "TP53 (Li-Fraumeni)".to_string(),
            "Diamond-Blackfan anemia".to_string()
        ]
    );
}

#[test]
fn germline_blm_excluded_by_icc_only() {
    let raw = vec!["germline BLM mutation".to_string()];
    let (who, _) = germline_conditions(&raw, TaxonomyProfile::who_2022());
    assert_eq!(who.len(), 1);
    let (icc, notes) = germline_conditions(&raw, TaxonomyProfile::icc_2022());
    assert!(icc.is_empty());
    assert_eq!(notes.len(), 1);
}

#[test]
fn germline_none_and_blanks_are_dropped() {
    let raw = vec!["None".to_string(), " , ".to_string()];
    let (kept, notes) = germline_conditions(&raw, TaxonomyProfile::who_2022());
    assert!(kept.is_empty());
    assert!(notes.is_empty());
}

#[test]
fn qualifier_order_is_fixed() {
    let q = Qualifiers {
        prior_therapy: PriorTherapy::AnyCombination,
        germline_predisposition: vec!["DDX41".to_string()],
        prior_mds_over_3_months: false,
        prior_mds_or_mpn_over_3_months: true,
    };
    let (out, _) = collect_qualifiers(&Category::MutatedTp53, &q, TaxonomyProfile::icc_2022());
    assert_eq!(
        out,
        vec![
            Qualifier::PriorCytotoxicTherapy,
            Qualifier::GermlinePredisposition(vec!["DDX41".to_string()]),
            Qualifier::ProgressedFromMds,
        ]
    );
}

#[test]
fn redirect_gets_nothing() {
    let q = Qualifiers {
        prior_therapy: PriorTherapy::CytotoxicChemotherapy,
        ..Default::default()
    };
    let (out, notes) = collect_qualifiers(&Category::NotAml, &q, TaxonomyProfile::who_2022());
    assert!(out.is_empty());
    assert_eq!(notes.len(), 1);
}

#[test]
fn phrases_per_taxonomy_and_family() {
    let therapy = Qualifier::PriorCytotoxicTherapy;
    assert_eq!(therapy.phrase(Taxonomy::Who2022, Family::Aml), "post cytotoxic therapy");
    assert_eq!(therapy.phrase(Taxonomy::Who2022, Family::Mds), "previous cytotoxic therapy");
    assert_eq!(therapy.phrase(Taxonomy::Icc2022, Family::Mds), "therapy related");

    let germline = Qualifier::GermlinePredisposition(vec!["DDX41".into(), "RUNX1".into()]);
    assert_eq!(
        germline.phrase(Taxonomy::Who2022, Family::Aml),
        "associated with DDX41, RUNX1"
    );
    assert_eq!(
        germline.phrase(Taxonomy::Icc2022, Family::Mds),
        "in the setting of DDX41, RUNX1"
    );

    let progressed = Qualifier::ProgressedFromMds;
    assert_eq!(progressed.phrase(Taxonomy::Who2022, Family::Mds), "progressed from MDS");
    assert_eq!(progressed.phrase(Taxonomy::Icc2022, Family::Aml), "arising post MDS");
    assert_eq!(progressed.phrase(Taxonomy::Icc2022, Family::Mds), "post MDS");
}
