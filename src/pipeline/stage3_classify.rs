use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::info;

use crate::ctx::{CaseInput, CaseOutcome, Ctx};
use crate::engine::{self, ClassificationResult};
use crate::engine::taxonomy::Taxonomy;
use crate::pipeline::Stage;

pub struct Stage3Classify;

impl Stage3Classify {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Classify {
    fn name(&self) -> &'static str {
        "stage3_classify"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.outcomes.len() != ctx.cases.len() {
            bail!(
                "routing produced {} outcomes for {} cases",
                ctx.outcomes.len(),
                ctx.cases.len()
            );
        }

        let taxonomies = ctx.taxonomies.clone();
        let results: Vec<Vec<ClassificationResult>> = if ctx.cases.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(ctx.threads)
                .build()
                .context("failed to build classification thread pool")?;
            let cases = &ctx.cases;
            let outcomes = &ctx.outcomes;
            pool.install(|| {
                cases
                    .par_iter()
                    .zip(outcomes.par_iter())
                    .map(|(case, outcome)| classify_case(case, outcome, &taxonomies))
                    .collect()
            })
        } else {
            ctx.cases
                .iter()
                .zip(ctx.outcomes.iter())
                .map(|(case, outcome)| classify_case(case, outcome, &taxonomies))
                .collect()
        };

        let mut errors = 0usize;
        for (outcome, res) in ctx.outcomes.iter_mut().zip(results) {
            errors += res.iter().filter(|r| r.is_error()).count();
            outcome.results = res;
        }
        info!(cases = ctx.outcomes.len(), errors, "classification_ready");
        Ok(())
    }
}

fn classify_case(
    case: &CaseInput,
    outcome: &CaseOutcome,
    taxonomies: &[Taxonomy],
) -> Vec<ClassificationResult> {
    taxonomies
        .iter()
        .map(|&t| engine::classify(&case.findings, t, outcome.family))
        .collect()
}
