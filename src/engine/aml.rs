use crate::engine::derivation::Derivation;
use crate::engine::findings::ClinicalFindings;
use crate::engine::label::{
    Category, Classification, Differentiation, WHO_AML_PLACEHOLDER, checked_blasts,
};
use crate::engine::qualifiers::collect_qualifiers;
use crate::engine::rules::{Outcome, Rule, RuleInput, evaluate};
use crate::engine::taxonomy::{Family, Taxonomy, TaxonomyProfile};
use crate::engine::{ClassificationResult, precondition_failure};

pub const WHO_RULES: &[Rule] = &[
    Rule::new("AML-defining recurrent genetic abnormality", recurrent_abnormality),
    Rule::new("MDS-related mutation", mds_related_mutation),
    Rule::new("MDS-related cytogenetics", mds_related_cytogenetics),
    Rule::new("Blast count below 20%", who_low_blasts),
    Rule::new("AML defined by differentiation", who_differentiation),
];

pub const ICC_RULES: &[Rule] = &[
    Rule::new("AML-defining recurrent genetic abnormality", recurrent_abnormality),
    Rule::new("Biallelic TP53", biallelic_tp53),
    Rule::new("MDS-related mutation", mds_related_mutation),
    Rule::new("MDS-related cytogenetics", mds_related_cytogenetics),
    Rule::new("AML, NOS", icc_nos),
];

pub fn rules_for(taxonomy: Taxonomy) -> &'static [Rule] {
    match taxonomy {
        Taxonomy::Who2022 => WHO_RULES,
        Taxonomy::Icc2022 => ICC_RULES,
    }
}

pub fn evaluate_aml(
    findings: &ClinicalFindings,
    profile: &'static TaxonomyProfile,
) -> ClassificationResult {
    let taxonomy = profile.taxonomy;
    let blasts = match checked_blasts(findings.blasts_percentage) {
        Ok(b) => b,
        Err(e) => return precondition_failure(taxonomy, Family::Aml, e),
    };

    let input = RuleInput {
        findings,
        profile,
        blasts,
    };
    let (category, log) = evaluate(rules_for(taxonomy), &input);
    let category = category.unwrap_or(Category::AmlDefault(None));
    let mut classification = Classification::new(taxonomy, Family::Aml, category);

    let log = match taxonomy {
        Taxonomy::Icc2022 => apply_icc_blast_range(&mut classification, blasts, log),
        Taxonomy::Who2022 => log,
    };

    let (qualifiers, notes) =
        collect_qualifiers(&classification.category, &findings.qualifiers, profile);
    classification.qualifiers = qualifiers;
    ClassificationResult::new(classification, log.with_all(notes))
}

fn apply_icc_blast_range(
    classification: &mut Classification,
    blasts: f64,
    log: Derivation,
) -> Derivation {
    if blasts < 10.0 {
        let line = format!(
            "Blast range: {}% < 10%, '{}' overridden",
            blasts,
            classification.base_text()
        );
        classification.category = Category::NotAml;
        log.with(line)
    } else if blasts < 20.0 && classification.category.converts_to_mds_aml() {
        classification.mds_aml = true;
        log.with(format!(
            "Blast range: {}% in 10-19%, reported as '{}'",
            blasts,
            classification.base_text()
        ))
    } else if blasts < 20.0 {
        log.with(format!(
            "Blast range: {}% in 10-19%, '{}' is AML-defining at this blast count",
            blasts,
            classification.base_text()
        ))
    } else {
        log.with(format!("Blast range: {}% >= 20%, label unchanged", blasts))
    }
}

fn recurrent_abnormality(input: &RuleInput<'_>) -> Outcome {
    let mut notes = Vec::new();
    let threshold = input.profile.acute_blast_threshold;
    for entry in input.profile.aml_defining {
        if !input.findings.aml_defining.is_set(entry.key) {
            continue;
        }
        if entry.acute_only && input.blasts < threshold {
            notes.push(format!(
                "{} detected but blasts {}% < {}%, not AML-defining",
                entry.key, input.blasts, threshold
            ));
            continue;
        }
        notes.push(format!("{} detected -> '{}'", entry.key, entry.label));
        return Outcome::matched(Category::RecurrentAbnormality(entry), notes);
    }
    if notes.is_empty() {
        notes.push("none detected".to_string());
    }
    Outcome {
        category: None,
        notes,
    }
}

fn biallelic_tp53(input: &RuleInput<'_>) -> Outcome {
    let conditions = input.findings.tp53_conditions();
    if conditions.is_empty() {
        return Outcome::no_match("no biallelic TP53 condition met");
    }
    let note = format!(
        "{} -> '{}'",
        conditions.join(", "),
        Category::MutatedTp53.text(input.profile.taxonomy)
    );
    Outcome::matched(Category::MutatedTp53, vec![note])
}

fn mds_related_mutation(input: &RuleInput<'_>) -> Outcome {
    let genes = input.findings.mds_mutations();
    if genes.is_empty() {
        return Outcome::no_match("none detected");
    }
    let note = format!(
        "{} -> '{}'",
        genes.join(", "),
        Category::MyelodysplasiaRelated.text(input.profile.taxonomy)
    );
    Outcome::matched(Category::MyelodysplasiaRelated, vec![note])
}

fn mds_related_cytogenetics(input: &RuleInput<'_>) -> Outcome {
    let abnormalities = input.findings.mds_cytogenetics();
    if abnormalities.is_empty() {
        return Outcome::no_match("none detected");
    }
    let note = format!(
        "{} -> '{}'",
        abnormalities.join(", "),
        Category::MyelodysplasiaRelated.text(input.profile.taxonomy)
    );
    Outcome::matched(Category::MyelodysplasiaRelated, vec![note])
}

fn who_low_blasts(input: &RuleInput<'_>) -> Outcome {
    if input.blasts >= 20.0 {
        return Outcome::no_match(format!("blasts {}% >= 20%", input.blasts));
    }
    Outcome::matched(
        Category::NotAml,
        vec![format!(
            "blasts {}% < 20% with no AML-defining or myelodysplasia-related finding; \
             reclassification as MDS suggested",
            input.blasts
        )],
    )
}

fn who_differentiation(input: &RuleInput<'_>) -> Outcome {
    let mut notes = vec![format!("default '{}'", WHO_AML_PLACEHOLDER)];
    let differentiation = match input.findings.aml_differentiation.as_deref() {
        None => {
            notes.push("AML_differentiation not provided".to_string());
            None
        }
        Some(code) => match Differentiation::from_fab(code) {
            None => {
                notes.push(format!("AML_differentiation '{}' not recognised", code));
                None
            }
            Some(d) if d.is_erythroid() && input.findings.not_erythroid => {
                notes.push(format!(
                    "AML_differentiation '{}' is erythroid but the case is marked not erythroid",
                    code
                ));
                None
            }
            Some(d) => Some(d),
        },
    };
    let category = Category::AmlDefault(differentiation);
    notes.push(format!("-> '{}'", category.text(input.profile.taxonomy)));
    Outcome::matched(category, notes)
}

fn icc_nos(input: &RuleInput<'_>) -> Outcome {
    let category = Category::AmlDefault(None);
    Outcome::matched(
        category.clone(),
        vec![format!("default -> '{}'", category.text(input.profile.taxonomy))],
    )
}
