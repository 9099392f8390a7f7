use serde::{Deserialize, Serialize};

use crate::engine::findings::ClinicalFindings;
use crate::engine::taxonomy::{Family, Taxonomy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub source: String,
    pub family_requested: String,
    pub family: Family,
    pub routing: String,
    pub blasts_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyResult {
    pub taxonomy: Taxonomy,
    pub family: Family,
    pub label: String,
    pub category: String,
    pub base_label: String,
    pub qualifiers: Vec<String>,
    pub error: bool,
    pub derivation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyeloClassV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub case_id: String,
    pub input: InputMeta,
    pub results: Vec<TaxonomyResult>,
    pub findings: ClinicalFindings,
    pub warnings: Vec<String>,
}

impl MyeloClassV1 {
    pub fn empty(tool_version: &str, case_id: &str, family: Family) -> Self {
        Self {
            tool: "kira-myeloclass".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            case_id: case_id.to_string(),
            input: InputMeta {
                source: String::new(),
                family_requested: "auto".to_string(),
                family,
                routing: String::new(),
                blasts_percentage: None,
            },
            results: Vec::new(),
            findings: ClinicalFindings::default(),
            warnings: Vec::new(),
        }
    }
}
