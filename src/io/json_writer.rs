use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::{CaseOutcome, Ctx};
use crate::engine::ClassificationResult;
use crate::schema::v1::{InputMeta, MyeloClassV1, TaxonomyResult};

pub fn taxonomy_result(result: &ClassificationResult) -> TaxonomyResult {
    let c = &result.classification;
    TaxonomyResult {
        taxonomy: c.taxonomy,
        family: c.family,
        label: result.label.clone(),
        category: c.category.code().to_string(),
        base_label: c.base_text(),
        qualifiers: c.qualifier_phrases(),
        error: result.is_error(),
        derivation: result.derivation.clone(),
    }
}

pub fn build_case_report(ctx: &Ctx, index: usize) -> Result<MyeloClassV1> {
    let case = ctx
        .cases
        .get(index)
        .with_context(|| format!("case {} missing", index))?;
    let outcome: &CaseOutcome = ctx
        .outcomes
        .get(index)
        .with_context(|| format!("outcome for case {} missing", case.id))?;
    if outcome.results.is_empty() && !ctx.taxonomies.is_empty() {
        bail!("case {} has not been classified", case.id);
    }

    let prefix = format!("{}: ", case.id);
    let warnings = ctx
        .warnings
        .iter()
        .filter(|w| w.starts_with(&prefix))
        .map(|w| w[prefix.len()..].to_string())
        .collect();

    Ok(MyeloClassV1 {
        tool: "kira-myeloclass".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        case_id: case.id.clone(),
        input: InputMeta {
            source: ctx.input.display().to_string(),
            family_requested: ctx.family.name().to_string(),
            family: outcome.family,
            routing: outcome.routing.clone(),
            blasts_percentage: case.findings.blasts_percentage,
        },
        results: outcome.results.iter().map(taxonomy_result).collect(),
        findings: case.findings.clone(),
        warnings,
    })
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_case_report(ctx, 0)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

pub fn write_jsonl(path: &Path, ctx: &Ctx) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = std::io::BufWriter::new(file);
    for index in 0..ctx.cases.len() {
        let report = build_case_report(ctx, index)?;
        serde_json::to_writer(&mut w, &report)?;
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}
