use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::{CaseInput, Ctx, InputFormat};
use crate::io;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let cases = match ctx.input_format {
            InputFormat::Json => {
                let findings = io::read_findings(&ctx.input)?;
                let id = findings
                    .case_id
                    .clone()
                    .unwrap_or_else(|| io::label_from_path(&ctx.input));
                vec![CaseInput { id, findings }]
            }
            InputFormat::JsonLines => io::read_findings_lines(&ctx.input)?,
        };

        // Duplicate ids are kept; each affected case gets the warning.
        let mut seen = HashSet::new();
        for case in &cases {
            if !seen.insert(case.id.as_str()) {
                ctx.warnings.push(format!("{}: duplicate case id", case.id));
            }
            for lint in case.findings.lint() {
                ctx.warnings.push(format!("{}: {}", case.id, lint));
            }
        }
        if !ctx.warnings.is_empty() {
            warn!(count = ctx.warnings.len(), "input warnings");
        }

        info!(cases = cases.len(), "cases_loaded");
        ctx.cases = cases;
        Ok(())
    }
}
