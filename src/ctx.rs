use std::path::{Path, PathBuf};

use crate::engine::ClassificationResult;
use crate::engine::findings::ClinicalFindings;
use crate::engine::taxonomy::{Family, Taxonomy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Standalone,
    Pipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    JsonLines,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".jsonl") || name.ends_with(".ndjson") {
            Self::JsonLines
        } else {
            Self::Json
        }
    }
}

/// Which evaluator family the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySelection {
    Fixed(Family),
    Auto,
}

impl FamilySelection {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fixed(Family::Aml) => "aml",
            Self::Fixed(Family::Mds) => "mds",
            Self::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseInput {
    pub id: String,
    pub findings: ClinicalFindings,
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub id: String,
    pub family: Family,
    pub routing: String,
    pub results: Vec<ClassificationResult>,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub jsonl_path: PathBuf,
    pub tsv_path: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            json_path: out_dir.join("myeloclass.json"),
            jsonl_path: out_dir.join("myeloclass.jsonl"),
            tsv_path: out_dir.join("myeloclass.tsv"),
            out_dir,
        }
    }

    pub fn dot_path(&self, case_id: &str, taxonomy: Taxonomy, single: bool) -> PathBuf {
        if single {
            self.out_dir
                .join(format!("derivation_{}.dot", taxonomy.slug()))
        } else {
            self.out_dir
                .join(format!("derivation_{}_{}.dot", case_id, taxonomy.slug()))
        }
    }
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub taxonomies: Vec<Taxonomy>,
    pub family: FamilySelection,
    pub write_json: bool,
    pub write_tsv: bool,
    pub write_dot: bool,
    pub threads: usize,
    pub run_mode: RunMode,
    pub cases: Vec<CaseInput>,
    pub outcomes: Vec<CaseOutcome>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        taxonomies: Vec<Taxonomy>,
        family: FamilySelection,
        write_json: bool,
        write_tsv: bool,
        write_dot: bool,
    ) -> Self {
        Self {
            input_format: InputFormat::detect(&input),
            input,
            taxonomies,
            family,
            write_json,
            write_tsv,
            write_dot,
            threads: 0,
            run_mode: RunMode::Standalone,
            cases: Vec::new(),
            outcomes: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths::new(out_dir),
        }
    }

    pub fn writes_any(&self) -> bool {
        self.write_json || self.write_tsv || self.write_dot || self.run_mode == RunMode::Pipeline
    }

    pub fn is_single_case(&self) -> bool {
        self.input_format == InputFormat::Json
    }
}
