//! Classification engine: WHO 2022 and ICC 2022 rule chains for AML and MDS.
//!
//! Every entry point is a pure function of the findings record. The caller picks
//! the family; the engine never routes between AML and MDS.

pub mod aml;
pub mod derivation;
pub mod findings;
pub mod label;
pub mod mds;
pub mod qualifiers;
pub mod rules;
pub mod taxonomy;

use crate::engine::derivation::Derivation;
use crate::engine::findings::ClinicalFindings;
use crate::engine::label::{Category, Classification, InputError};
use crate::engine::taxonomy::{Family, Taxonomy};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub label: String,
    pub derivation: Vec<String>,
}

impl ClassificationResult {
    pub fn new(classification: Classification, derivation: Derivation) -> Self {
        let label = classification.render();
        Self {
            classification,
            label,
            derivation: derivation.into_steps(),
        }
    }

    pub fn taxonomy(&self) -> Taxonomy {
        self.classification.taxonomy
    }

    pub fn family(&self) -> Family {
        self.classification.family
    }

    pub fn is_error(&self) -> bool {
        self.classification.is_error()
    }
}

pub(crate) fn precondition_failure(
    taxonomy: Taxonomy,
    family: Family,
    error: InputError,
) -> ClassificationResult {
    let classification = Classification::new(taxonomy, family, Category::InvalidInput(error));
    ClassificationResult::new(classification, Derivation::single(format!("Error: {}", error)))
}

pub fn classify(
    findings: &ClinicalFindings,
    taxonomy: Taxonomy,
    family: Family,
) -> ClassificationResult {
    match family {
        Family::Aml => aml::evaluate_aml(findings, taxonomy.profile()),
        Family::Mds => mds::evaluate_mds(findings, taxonomy.profile()),
    }
}

pub fn classify_aml_who(findings: &ClinicalFindings) -> ClassificationResult {
    classify(findings, Taxonomy::Who2022, Family::Aml)
}

pub fn classify_aml_icc(findings: &ClinicalFindings) -> ClassificationResult {
    classify(findings, Taxonomy::Icc2022, Family::Aml)
}

pub fn classify_mds_who(findings: &ClinicalFindings) -> ClassificationResult {
    classify(findings, Taxonomy::Who2022, Family::Mds)
}

pub fn classify_mds_icc(findings: &ClinicalFindings) -> ClassificationResult {
    classify(findings, Taxonomy::Icc2022, Family::Mds)
}

/// Rule names for one evaluator, in precedence order.
pub fn rule_table(taxonomy: Taxonomy, family: Family) -> Vec<&'static str> {
    match family {
        Family::Aml => rules::rule_names(aml::rules_for(taxonomy)),
        Family::Mds => rules::rule_names(mds::rules_for(taxonomy)),
    }
}
