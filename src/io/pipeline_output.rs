use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ctx::Ctx;

const PIPELINE_DIR: &str = "kira-myeloclass";

#[derive(Debug, Clone, Serialize)]
struct ToolMeta {
    name: String,
    version: String,
    stage: String,
}

#[derive(Debug, Clone, Serialize)]
struct StepInput {
    path: String,
    n_cases: usize,
    taxonomies: Vec<String>,
    family: String,
}

#[derive(Debug, Clone, Serialize)]
struct PipelineStep {
    tool: ToolMeta,
    input: StepInput,
    artifacts: Vec<String>,
    n_errors: usize,
    n_warnings: usize,
}

pub fn ensure_pipeline_out_dir(out_dir: &Path) -> Result<PathBuf> {
    let dir = out_dir.join(PIPELINE_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir)
}

pub fn write_pipeline_step(ctx: &Ctx, artifacts: &[PathBuf]) -> Result<PathBuf> {
    let path = ctx.output.out_dir.join("pipeline_step.json");
    let step = PipelineStep {
        tool: ToolMeta {
            name: "kira-myeloclass".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            stage: "classification".to_string(),
        },
        input: StepInput {
            path: ctx.input.display().to_string(),
            n_cases: ctx.cases.len(),
            taxonomies: ctx.taxonomies.iter().map(|t| t.name().to_string()).collect(),
            family: ctx.family.name().to_string(),
        },
        artifacts: artifacts
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect(),
        n_errors: ctx
            .outcomes
            .iter()
            .flat_map(|o| &o.results)
            .filter(|r| r.is_error())
            .count(),
        n_warnings: ctx.warnings.len(),
    };
    let file = fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &step)?;
    Ok(path)
}
