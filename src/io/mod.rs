use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use crate::ctx::CaseInput;
use crate::engine::findings::ClinicalFindings;

pub mod flow;
pub mod json_writer;
pub mod pipeline_output;
pub mod summary;
pub mod tsv_writer;

pub fn read_findings(path: &Path) -> Result<ClinicalFindings> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let findings = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("failed to parse findings JSON {}", path.display()))?;
    Ok(findings)
}

/// One findings record per line; blank lines and `#` comments are skipped.
pub fn read_findings_lines(path: &Path) -> Result<Vec<CaseInput>> {
    let reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut cases = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("{}:{} read failed", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let findings: ClinicalFindings = serde_json::from_str(trimmed)
            .with_context(|| format!("{}:{} malformed findings record", path.display(), line_no))?;
        let id = findings
            .case_id
            .clone()
            .unwrap_or_else(|| format!("line{}", line_no));
        cases.push(CaseInput { id, findings });
    }
    Ok(cases)
}

pub fn label_from_path(path: &Path) -> String {
    let stem = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("case");
    let stem = stem.strip_suffix(".gz").unwrap_or(stem);
    stem.rsplit_once('.')
        .map(|(s, _)| s)
        .unwrap_or(stem)
        .to_string()
}

pub(crate) fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(file))
    }
}
