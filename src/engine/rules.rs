//! First-match-wins interpreter over a declarative rule table.
//!
//! Each rule is a pure function from the case to an [`Outcome`]. The chain is a
//! left fold: once a rule has produced a category, every later rule is recorded
//! as skipped so the derivation still lists the full table.

use crate::engine::derivation::Derivation;
use crate::engine::findings::ClinicalFindings;
use crate::engine::label::Category;
use crate::engine::taxonomy::TaxonomyProfile;

pub struct RuleInput<'a> {
    pub findings: &'a ClinicalFindings,
    pub profile: &'static TaxonomyProfile,
    pub blasts: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub category: Option<Category>,
    pub notes: Vec<String>,
}

impl Outcome {
    pub fn matched(category: Category, notes: Vec<String>) -> Self {
        Self {
            category: Some(category),
            notes,
        }
    }

    pub fn no_match(note: impl Into<String>) -> Self {
        Self {
            category: None,
            notes: vec![note.into()],
        }
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub eval: fn(&RuleInput<'_>) -> Outcome,
}

impl Rule {
    pub const fn new(name: &'static str, eval: fn(&RuleInput<'_>) -> Outcome) -> Self {
        Self { name, eval }
    }
}

pub fn evaluate(rules: &[Rule], input: &RuleInput<'_>) -> (Option<Category>, Derivation) {
    let taxonomy = input.profile.taxonomy;
    rules
        .iter()
        .fold((None, Derivation::new()), |(category, log), rule| match category {
            Some(found) => {
                let line = format!(
                    "{}: not evaluated, already classified as '{}'",
                    rule.name,
                    found.text(taxonomy)
                );
                (Some(found), log.with(line))
            }
            None => {
                let outcome = (rule.eval)(input);
                let log = log.with_all(
                    outcome
                        .notes
                        .into_iter()
                        .map(|note| format!("{}: {}", rule.name, note)),
                );
                (outcome.category, log)
            }
        })
}

/// Rule names in precedence order, for listing.
pub fn rule_names(rules: &[Rule]) -> Vec<&'static str> {
    rules.iter().map(|r| r.name).collect()
}
