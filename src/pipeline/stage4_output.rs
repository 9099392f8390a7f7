use anyhow::Result;
use tracing::info;

use crate::ctx::{Ctx, RunMode};
use crate::io::{flow, json_writer, pipeline_output, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage4Output;

impl Stage4Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Output {
    fn name(&self) -> &'static str {
        "stage4_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut artifacts = Vec::new();

        if ctx.write_json {
            if ctx.is_single_case() {
                json_writer::write_json(&ctx.output.json_path, ctx)?;
                artifacts.push(ctx.output.json_path.clone());
            } else {
                json_writer::write_jsonl(&ctx.output.jsonl_path, ctx)?;
                artifacts.push(ctx.output.jsonl_path.clone());
            }
        }
        if ctx.write_tsv {
            tsv_writer::write_tsv(&ctx.output.tsv_path, ctx)?;
            artifacts.push(ctx.output.tsv_path.clone());
        }
        if ctx.write_dot {
            let single = ctx.is_single_case();
            for outcome in &ctx.outcomes {
                for result in &outcome.results {
                    let path = ctx.output.dot_path(&outcome.id, result.taxonomy(), single);
                    flow::write_dot(&path, result)?;
                    artifacts.push(path);
                }
            }
        }
        if ctx.run_mode == RunMode::Pipeline {
            let step = pipeline_output::write_pipeline_step(ctx, &artifacts)?;
            artifacts.push(step);
        }

        info!(artifacts = artifacts.len(), "stage4_output_ready");
        Ok(())
    }
}
