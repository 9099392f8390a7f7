use kira_myeloclass::engine::classify_aml_who;
use kira_myeloclass::engine::findings::{ClinicalFindings, PriorTherapy};
use kira_myeloclass::engine::label::{BLASTS_OUT_OF_RANGE_LABEL, MISSING_BLASTS_LABEL};

fn case(blasts: f64) -> ClinicalFindings {
    ClinicalFindings {
        blasts_percentage: Some(blasts),
        ..Default::default()
    }
}

fn with_abnormality(blasts: f64, key: &str) -> ClinicalFindings {
    let mut f = case(blasts);
    f.aml_defining.set(key, true);
    f
}

#[test]
fn npm1_without_qualifiers() {
    let r = classify_aml_who(&with_abnormality(60.0, "NPM1"));
    assert_eq!(r.label, "AML with NPM1 mutation (WHO 2022)");
    assert!(r.derivation[0].contains("NPM1 detected"));
}

#[test]
fn missing_blasts_is_reported() {
    let f = ClinicalFindings::default();
    let r = classify_aml_who(&f);
    assert_eq!(r.label, MISSING_BLASTS_LABEL);
    assert_eq!(r.derivation.len(), 1);
    assert!(r.is_error());
}

#[test]
fn out_of_range_blasts_are_reported() {
    for blasts in [-1.0, 101.0, f64::NAN] {
        let r = classify_aml_who(&case(blasts));
        assert_eq!(r.label, BLASTS_OUT_OF_RANGE_LABEL);
        assert_eq!(r.derivation.len(), 1);
    }
}

#[test]
fn boundary_blasts_are_accepted() {
    assert!(!classify_aml_who(&case(0.0)).is_error());
    assert!(!classify_aml_who(&case(100.0)).is_error());
}

#[test]
fn acute_only_marker_rejected_below_20() {
    let r = classify_aml_who(&with_abnormality(15.0, "KMT2A"));
    assert_eq!(r.label, "Not AML, consider MDS classification (WHO 2022)");
    assert!(
        r.derivation
            .iter()
            .any(|s| s.contains("KMT2A detected but blasts 15% < 20%"))
    );
    assert!(r.derivation.iter().any(|s| s.contains("reclassification as MDS")));
}

#[test]
fn acute_only_marker_accepted_at_20() {
    let r = classify_aml_who(&with_abnormality(20.0, "KMT2A"));
    assert_eq!(r.label, "AML with KMT2A rearrangement (WHO 2022)");
    let r = classify_aml_who(&with_abnormality(35.0, "BCR::ABL1"));
    assert_eq!(r.label, "AML with BCR::ABL1 fusion (WHO 2022)");
}

#[test]
fn specific_abnormality_wins_over_rejected_marker() {
    let mut f = with_abnormality(15.0, "KMT2A");
    f.aml_defining.set("NUP98", true);
    let r = classify_aml_who(&f);
    assert_eq!(r.label, "AML with NUP98 rearrangement (WHO 2022)");
}

#[test]
fn icc_only_fusion_is_ignored() {
    let r = classify_aml_who(&with_abnormality(50.0, "IRF2BP2::RARA"));
    assert_eq!(
        r.label,
        "Acute myeloid leukaemia, unknown differentiation (WHO 2022)"
    );
}

#[test]
fn mds_related_mutation_and_cytogenetics() {
    let mut f = case(30.0);
    f.mds_related_mutations.set("ASXL1", true);
    assert_eq!(
        classify_aml_who(&f).label,
        "AML, myelodysplasia related (WHO 2022)"
    );

    let mut f = case(30.0);
    f.mds_related_cytogenetics.set("Complex_karyotype", true);
    let r = classify_aml_who(&f);
    assert_eq!(r.label, "AML, myelodysplasia related (WHO 2022)");
    assert!(r.derivation.iter().any(|s| s.starts_with("MDS-related mutation: none")));
}

#[test]
fn biallelic_tp53_is_not_an_aml_rule() {
    let mut f = case(30.0);
    f.biallelic_tp53.set("2_x_TP53_mutations", true);
    let r = classify_aml_who(&f);
    assert_eq!(
        r.label,
        "Acute myeloid leukaemia, unknown differentiation (WHO 2022)"
    );
}

#[test]
fn differentiation_from_fab_code() {
    let cases = [
        (Some("M2"), false, "Acute myeloid leukaemia with maturation"),
        (Some(" m4eo "), false, "Acute myelomonocytic leukaemia with eosinophilia"),
        (Some("M6b"), false, "Pure erythroid leukaemia"),
        (Some("M6b"), true, "Acute myeloid leukaemia, unknown differentiation"),
        (Some("monocytic"), false, "Acute myeloid leukaemia, unknown differentiation"),
        (None, false, "Acute myeloid leukaemia, unknown differentiation"),
    ];
    for (code, not_erythroid, expected) in cases {
        let mut f = case(45.0);
        f.aml_differentiation = code.map(str::to_string);
        f.not_erythroid = not_erythroid;
        let r = classify_aml_who(&f);
        assert_eq!(r.label, format!("{} (WHO 2022)", expected), "code {:?}", code);
        assert!(
            r.derivation
                .iter()
                .any(|s| s.contains("[define by differentiation]"))
        );
    }
}

#[test]
fn qualifiers_in_order() {
    let mut f = with_abnormality(40.0, "NPM1");
    f.qualifiers.prior_therapy = PriorTherapy::CytotoxicChemotherapy;
    f.qualifiers.germline_predisposition =
        vec!["TP53 (Li-Fraumeni), Diamond-Blackfan anemia".to_string()];
    f.qualifiers.prior_mds_over_3_months = true;
    let r = classify_aml_who(&f);
    assert_eq!(
        r.label,
        "AML with NPM1 mutation, post cytotoxic therapy, associated with TP53 (Li-Fraumeni), \
         progressed from MDS (WHO 2022)"
    );
    assert!(
        r.derivation
            .iter()
            .any(|s| s.contains("'Diamond-Blackfan anemia' is not recognised by WHO 2022"))
    );
}

#[test]
fn immune_interventions_do_not_qualify() {
    let mut f = with_abnormality(40.0, "NPM1");
    f.qualifiers.prior_therapy = PriorTherapy::ImmuneInterventions;
    let r = classify_aml_who(&f);
    assert_eq!(r.label, "AML with NPM1 mutation (WHO 2022)");
    assert!(
        r.derivation
            .iter()
            .any(|s| s.contains("not a qualifying exposure under WHO 2022"))
    );
}

#[test]
fn redirect_suppresses_qualifiers() {
    let mut f = case(12.0);
    f.qualifiers.prior_therapy = PriorTherapy::AnyCombination;
    f.qualifiers.prior_mds_or_mpn_over_3_months = true;
    let r = classify_aml_who(&f);
    assert_eq!(r.label, "Not AML, consider MDS classification (WHO 2022)");
}
