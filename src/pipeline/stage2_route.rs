use anyhow::Result;
use tracing::{debug, info};

use crate::ctx::{CaseOutcome, Ctx, FamilySelection};
use crate::engine::findings::ClinicalFindings;
use crate::engine::taxonomy::{Family, Taxonomy};
use crate::pipeline::Stage;

const ACUTE_BLASTS: f64 = 20.0;

/// Caller-side choice of evaluator family, returned with a one-line reason.
///
/// Auto routing only counts AML-defining flags that one of `taxonomies` admits at
/// the case's blast count, so acute-only markers below threshold stay on the MDS path.
pub fn route_family(
    findings: &ClinicalFindings,
    selection: FamilySelection,
    taxonomies: &[Taxonomy],
) -> (Family, String) {
    match selection {
        FamilySelection::Fixed(family) => (family, format!("{} requested", family.name())),
        FamilySelection::Auto => match findings.blasts_percentage {
            None => (
                Family::Aml,
                "blasts_percentage missing, AML path reports it".to_string(),
            ),
            Some(b) if b >= ACUTE_BLASTS => (Family::Aml, format!("blasts {}% >= 20%", b)),
            Some(b) => {
                let admitted = findings.admitted_aml_defining(b, taxonomies);
                if admitted.is_empty() {
                    (
                        Family::Mds,
                        format!("blasts {}% < 20% without AML-defining abnormality", b),
                    )
                } else {
                    (
                        Family::Aml,
                        format!(
                            "AML-defining genetic abnormality present: {}",
                            admitted.join(", ")
                        ),
                    )
                }
            }
        },
    }
}

pub struct Stage2Route;

impl Stage2Route {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Route {
    fn name(&self) -> &'static str {
        "stage2_route"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut outcomes = Vec::with_capacity(ctx.cases.len());
        let mut aml = 0usize;
        for case in &ctx.cases {
            let (family, routing) = route_family(&case.findings, ctx.family, &ctx.taxonomies);
            debug!(case = %case.id, family = family.name(), routing = %routing, "case_routed");
            if family == Family::Aml {
                aml += 1;
            }
            outcomes.push(CaseOutcome {
                id: case.id.clone(),
                family,
                routing,
                results: Vec::new(),
            });
        }
        info!(aml, mds = outcomes.len() - aml, "routing_ready");
        ctx.outcomes = outcomes;
        Ok(())
    }
}
