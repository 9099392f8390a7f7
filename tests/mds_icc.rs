use kira_myeloclass::engine::classify_mds_icc;
use kira_myeloclass::engine::findings::{ClinicalFindings, PriorTherapy};

fn case(blasts: f64) -> ClinicalFindings {
    ClinicalFindings {
        blasts_percentage: Some(blasts),
        ..Default::default()
    }
}

#[test]
fn mutated_tp53_takes_qualifiers() {
    let mut f = case(3.0);
    f.biallelic_tp53.set("2_x_TP53_mutations", true);
    assert_eq!(classify_mds_icc(&f).label, "MDS with mutated TP53 (ICC 2022)");

    f.qualifiers.prior_therapy = PriorTherapy::CytotoxicChemotherapy;
    assert_eq!(
        classify_mds_icc(&f).label,
        "MDS with mutated TP53, therapy related (ICC 2022)"
    );
}

#[test]
fn blast_bands() {
    assert_eq!(classify_mds_icc(&case(12.0)).label, "MDS/AML (ICC 2022)");
    assert_eq!(classify_mds_icc(&case(7.0)).label, "MDS with excess blasts (ICC 2022)");
}

#[test]
fn genetic_subtypes() {
    let mut f = case(2.0);
    f.mds_related_mutations.set("SF3B1", true);
    assert_eq!(classify_mds_icc(&f).label, "MDS with mutated SF3B1 (ICC 2022)");

    let mut f = case(2.0);
    f.mds_related_cytogenetics.set("del(5q)/t(5q)/add(5q)", true);
    assert_eq!(classify_mds_icc(&f).label, "MDS with del(5q) (ICC 2022)");
}

#[test]
fn hypoplasia_is_not_a_category() {
    let mut f = case(2.0);
    f.hypoplasia = true;
    assert_eq!(classify_mds_icc(&f).label, "MDS, NOS (ICC 2022)");
}

#[test]
fn lineage_counts() {
    let mut f = case(2.0);
    f.dysplastic_lineages = Some(1);
    assert_eq!(
        classify_mds_icc(&f).label,
        "MDS, NOS with single lineage dysplasia (ICC 2022)"
    );
    f.dysplastic_lineages = Some(2);
    assert_eq!(
        classify_mds_icc(&f).label,
        "MDS, NOS with multilineage dysplasia (ICC 2022)"
    );
}

#[test]
fn monosomy_7_without_dysplasia() {
    let mut f = case(2.0);
    f.dysplastic_lineages = Some(0);
    f.mds_related_cytogenetics.set("-7/del(7q)", true);
    assert_eq!(classify_mds_icc(&f).label, "MDS, NOS without dysplasia (ICC 2022)");
}

#[test]
fn progression_wording() {
    let mut f = case(2.0);
    f.qualifiers.prior_mds_over_3_months = true;
    assert_eq!(classify_mds_icc(&f).label, "MDS, NOS, post MDS (ICC 2022)");
}

#[test]
fn display_matches_label() {
    let mut f = case(2.0);
    f.dysplastic_lineages = Some(3);
    let r = classify_mds_icc(&f);
    assert_eq!(r.classification.to_string(), r.label);
}

#[test]
fn out_of_range_blasts_are_reported() {
    use kira_myeloclass::engine::label::BLASTS_OUT_OF_RANGE_LABEL;
    for blasts in [-1.0, 101.0] {
        let r = classify_mds_icc(&case(blasts));
        assert_eq!(r.label, BLASTS_OUT_OF_RANGE_LABEL);
        assert_eq!(r.derivation.len(), 1);
        assert!(r.derivation[0].contains("outside [0, 100]"));
    }
}
