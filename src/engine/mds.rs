use crate::engine::findings::{COMPLEX_KARYOTYPE, ClinicalFindings, DEL_5Q, MONOSOMY_7, SF3B1};
use crate::engine::label::{Category, Classification, checked_blasts};
use crate::engine::qualifiers::collect_qualifiers;
use crate::engine::rules::{Outcome, Rule, RuleInput, evaluate};
use crate::engine::taxonomy::{Family, Taxonomy, TaxonomyProfile};
use crate::engine::{ClassificationResult, precondition_failure};

pub const WHO_RULES: &[Rule] = &[
    Rule::new("Biallelic TP53", biallelic_tp53),
    Rule::new("Blast count and fibrosis", who_blasts_fibrosis),
    Rule::new("SF3B1 mutation", sf3b1),
    Rule::new("del(5q)", del_5q),
    Rule::new("Hypoplasia", hypoplasia),
    Rule::new("Dysplastic lineages", who_lineages),
    Rule::new("MDS, unclassifiable", unclassified),
];

pub const ICC_RULES: &[Rule] = &[
    Rule::new("Mutated TP53", biallelic_tp53),
    Rule::new("Blast count", icc_blasts),
    Rule::new("SF3B1 mutation", sf3b1),
    Rule::new("del(5q)", del_5q),
    Rule::new("Dysplastic lineages", icc_lineages),
    Rule::new("Monosomy 7 or complex karyotype", icc_without_dysplasia),
    Rule::new("MDS, NOS", unclassified),
];

pub fn rules_for(taxonomy: Taxonomy) -> &'static [Rule] {
    match taxonomy {
        Taxonomy::Who2022 => WHO_RULES,
        Taxonomy::Icc2022 => ICC_RULES,
    }
}

pub fn evaluate_mds(
    findings: &ClinicalFindings,
    profile: &'static TaxonomyProfile,
) -> ClassificationResult {
    let taxonomy = profile.taxonomy;
    let blasts = match checked_blasts(findings.blasts_percentage) {
        Ok(b) => b,
        Err(e) => return precondition_failure(taxonomy, Family::Mds, e),
    };

    let input = RuleInput {
        findings,
        profile,
        blasts,
    };
    let (category, log) = evaluate(rules_for(taxonomy), &input);
    let category = category.unwrap_or(Category::MdsUnclassified);
    let mut classification = Classification::new(taxonomy, Family::Mds, category);

    // WHO reports TP53-defined MDS without qualifiers.
    if taxonomy == Taxonomy::Who2022 && classification.category == Category::MdsBiallelicTp53 {
        let log = log.with("Qualifiers: not appended to MDS with biallelic TP53 inactivation");
        return ClassificationResult::new(classification, log);
    }

    let (qualifiers, notes) =
        collect_qualifiers(&classification.category, &findings.qualifiers, profile);
    classification.qualifiers = qualifiers;
    ClassificationResult::new(classification, log.with_all(notes))
}

fn matched(category: Category, input: &RuleInput<'_>, why: String) -> Outcome {
    let note = format!("{} -> '{}'", why, category.text(input.profile.taxonomy));
    Outcome::matched(category, vec![note])
}

fn biallelic_tp53(input: &RuleInput<'_>) -> Outcome {
    let conditions = input.findings.tp53_conditions();
    if conditions.is_empty() {
        return Outcome::no_match("no biallelic TP53 condition met");
    }
    matched(Category::MdsBiallelicTp53, input, conditions.join(", "))
}

fn who_blasts_fibrosis(input: &RuleInput<'_>) -> Outcome {
    let b = input.blasts;
    if (5.0..20.0).contains(&b) && input.findings.fibrotic {
        matched(Category::MdsFibrotic, input, format!("blasts {}% with fibrosis", b))
    } else if (10.0..20.0).contains(&b) {
        matched(Category::MdsIncreasedBlasts2, input, format!("blasts {}% in 10-19%", b))
    } else if (5.0..10.0).contains(&b) {
        matched(Category::MdsIncreasedBlasts1, input, format!("blasts {}% in 5-9%", b))
    } else {
        Outcome::no_match(format!("blasts {}% outside 5-19%", b))
    }
}

fn icc_blasts(input: &RuleInput<'_>) -> Outcome {
    let b = input.blasts;
    if (10.0..20.0).contains(&b) {
        matched(Category::MdsIncreasedBlasts2, input, format!("blasts {}% in 10-19%", b))
    } else if (5.0..10.0).contains(&b) {
        matched(Category::MdsIncreasedBlasts1, input, format!("blasts {}% in 5-9%", b))
    } else {
        Outcome::no_match(format!("blasts {}% outside 5-19%", b))
    }
}

fn sf3b1(input: &RuleInput<'_>) -> Outcome {
    if !input.findings.mds_related_mutations.is_set(SF3B1) {
        return Outcome::no_match("SF3B1 not mutated");
    }
    matched(Category::MdsSf3b1, input, "SF3B1 mutated".to_string())
}

fn del_5q(input: &RuleInput<'_>) -> Outcome {
    if !input.findings.mds_related_cytogenetics.is_set(DEL_5Q) {
        return Outcome::no_match("del(5q) not detected");
    }
    matched(Category::MdsDel5q, input, "del(5q) detected".to_string())
}

fn hypoplasia(input: &RuleInput<'_>) -> Outcome {
    if !input.findings.hypoplasia {
        return Outcome::no_match("marrow not hypoplastic");
    }
    matched(Category::MdsHypoplastic, input, "hypoplastic marrow".to_string())
}

fn who_lineages(input: &RuleInput<'_>) -> Outcome {
    match input.findings.dysplastic_lineages {
        Some(n) if n >= 1 => matched(
            Category::MdsLowBlasts { multilineage: n > 1 },
            input,
            format!("{} dysplastic lineage(s)", n),
        ),
        Some(n) => Outcome::no_match(format!("{} dysplastic lineages", n)),
        None => Outcome::no_match("number of dysplastic lineages not provided"),
    }
}

fn icc_lineages(input: &RuleInput<'_>) -> Outcome {
    match input.findings.dysplastic_lineages {
        Some(1) => matched(
            Category::MdsLowBlasts { multilineage: false },
            input,
            "1 dysplastic lineage".to_string(),
        ),
        Some(n) if n > 1 => matched(
            Category::MdsLowBlasts { multilineage: true },
            input,
            format!("{} dysplastic lineages", n),
        ),
        Some(n) => Outcome::no_match(format!("{} dysplastic lineages", n)),
        None => Outcome::no_match("number of dysplastic lineages not provided"),
    }
}

fn icc_without_dysplasia(input: &RuleInput<'_>) -> Outcome {
    let found = input
        .findings
        .mds_related_cytogenetics
        .set_among(&[MONOSOMY_7, COMPLEX_KARYOTYPE]);
    if found.is_empty() {
        return Outcome::no_match("neither -7/del(7q) nor complex karyotype detected");
    }
    matched(Category::MdsWithoutDysplasia, input, found.join(", "))
}

fn unclassified(input: &RuleInput<'_>) -> Outcome {
    matched(Category::MdsUnclassified, input, "no specific rule matched".to_string())
}
