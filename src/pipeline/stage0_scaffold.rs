use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::ctx::{Ctx, OutputPaths, RunMode};
use crate::io::pipeline_output;
use crate::pipeline::Stage;

pub struct Stage0Scaffold;

impl Stage0Scaffold {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Scaffold {
    fn name(&self) -> &'static str {
        "stage0_scaffold"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.run_mode == RunMode::Pipeline {
            let out_dir = pipeline_output::ensure_pipeline_out_dir(&ctx.output.out_dir)?;
            ctx.output = OutputPaths::new(out_dir);
            ctx.write_json = true;
            ctx.write_tsv = true;
        }
        if !ctx.writes_any() {
            return Ok(());
        }
        fs::create_dir_all(&ctx.output.out_dir).with_context(|| {
            format!("failed to create {}", ctx.output.out_dir.display())
        })?;
        info!(
            out_dir = %ctx.output.out_dir.display(),
            "output_dir_ready"
        );
        Ok(())
    }
}
