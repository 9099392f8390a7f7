//! Structured clinical findings for a single case.
//!
//! The record is produced upstream by the report extraction service. Decoding is
//! lenient: missing, null or mistyped fields fall back to their defaults, unknown
//! keys are ignored, and unrecognised therapy terms decode as [`PriorTherapy::None`].
//! A `blasts_percentage` that is present but not a number is kept as NaN so that it
//! surfaces as an out-of-range error rather than as a missing value.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

use crate::engine::taxonomy::{Taxonomy, TaxonomyProfile};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalFindings {
    #[serde(deserialize_with = "lenient_id")]
    pub case_id: Option<String>,
    /// Non-numeric values decode as NaN so the evaluators report them as out of range.
    #[serde(deserialize_with = "lenient_blasts")]
    pub blasts_percentage: Option<f64>,
    #[serde(rename = "AML_defining_recurrent_genetic_abnormalities")]
    pub aml_defining: FlagMap,
    #[serde(rename = "Biallelic_TP53_mutation")]
    pub biallelic_tp53: FlagMap,
    #[serde(rename = "MDS_related_mutation")]
    pub mds_related_mutations: FlagMap,
    #[serde(rename = "MDS_related_cytogenetics")]
    pub mds_related_cytogenetics: FlagMap,
    #[serde(rename = "AML_differentiation", deserialize_with = "lenient_str")]
    pub aml_differentiation: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub not_erythroid: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub fibrotic: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub hypoplasia: bool,
    #[serde(
        rename = "number_of_dysplastic_lineages",
        deserialize_with = "lenient_count"
    )]
    pub dysplastic_lineages: Option<u32>,
    #[serde(deserialize_with = "lenient_qualifiers")]
    pub qualifiers: Qualifiers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qualifiers {
    #[serde(rename = "previous_cytotoxic_therapy")]
    pub prior_therapy: PriorTherapy,
    #[serde(
        rename = "predisposing_germline_variant",
        deserialize_with = "germline_entries"
    )]
    pub germline_predisposition: Vec<String>,
    #[serde(
        rename = "previous_MDS_diagnosed_over_3_months_ago",
        deserialize_with = "lenient_bool"
    )]
    pub prior_mds_over_3_months: bool,
    #[serde(
        rename = "previous_MDS/MPN_diagnosed_over_3_months_ago",
        deserialize_with = "lenient_bool"
    )]
    pub prior_mds_or_mpn_over_3_months: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorTherapy {
    #[default]
    None,
    IonisingRadiation,
    CytotoxicChemotherapy,
    ImmuneInterventions,
    AnyCombination,
}

impl PriorTherapy {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::IonisingRadiation => "Ionising radiation",
            Self::CytotoxicChemotherapy => "Cytotoxic chemotherapy",
            Self::ImmuneInterventions => "Immune interventions",
            Self::AnyCombination => "Any combination",
        }
    }

    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ionising radiation" | "ionizing radiation" => Self::IonisingRadiation,
            "cytotoxic chemotherapy" => Self::CytotoxicChemotherapy,
            "immune interventions" => Self::ImmuneInterventions,
            "any combination" => Self::AnyCombination,
            _ => Self::None,
        }
    }
}

impl Serialize for PriorTherapy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PriorTherapy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = raw_value(deserializer)?;
        Ok(raw.as_str().map(Self::from_label).unwrap_or_default())
    }
}

/// Independent boolean flags keyed by gene, fusion or abnormality name.
///
/// Only `true` values are meaningful; anything else (false, null, strings) reads
/// as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagMap(BTreeMap<String, bool>);

impl FlagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: &str, value: bool) {
        self.0.insert(key.to_string(), value);
    }

    pub fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_set(k))
    }

    /// Keys from `known` that are set, in the order of `known`.
    pub fn set_among<'k>(&self, known: &[&'k str]) -> Vec<&'k str> {
        known.iter().copied().filter(|k| self.is_set(k)).collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'a> FromIterator<(&'a str, bool)> for FlagMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl Serialize for FlagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlagMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = match raw_value(deserializer)? {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| (k, v.as_bool().unwrap_or(false)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(Self(map))
    }
}

pub const TP53_CONDITIONS: &[&str] = &[
    "2_x_TP53_mutations",
    "1_x_TP53_mutation_del_17p",
    "1_x_TP53_mutation_LOH",
    "1_x_TP53_mutation_50_percent_vaf",
    "1_x_TP53_mutation_10_percent_vaf",
];

pub const MDS_RELATED_GENES: &[&str] = &[
    "ASXL1", "BCOR", "EZH2", "RUNX1", "SF3B1", "SRSF2", "STAG2", "U2AF1", "ZRSR2",
];

pub const MDS_RELATED_CYTOGENETICS: &[&str] = &[
    "Complex_karyotype",
    "del(5q)/t(5q)/add(5q)",
    "-7/del(7q)",
    "+8",
    "del(11q)",
    "del(12p)/t(12p)/add(12p)",
    "-13",
    "i(17q)/-17/add(17p)/del(17p)",
    "del(20q)",
    "idic(X)(q13)",
];

pub const SF3B1: &str = "SF3B1";
pub const DEL_5Q: &str = "del(5q)/t(5q)/add(5q)";
pub const MONOSOMY_7: &str = "-7/del(7q)";
pub const COMPLEX_KARYOTYPE: &str = "Complex_karyotype";

impl ClinicalFindings {
    pub fn tp53_conditions(&self) -> Vec<&'static str> {
        self.biallelic_tp53.set_among(TP53_CONDITIONS)
    }

    pub fn has_biallelic_tp53(&self) -> bool {
        self.biallelic_tp53.any(TP53_CONDITIONS)
    }

    pub fn mds_mutations(&self) -> Vec<&'static str> {
        self.mds_related_mutations.set_among(MDS_RELATED_GENES)
    }

    pub fn mds_cytogenetics(&self) -> Vec<&'static str> {
        self.mds_related_cytogenetics
            .set_among(MDS_RELATED_CYTOGENETICS)
    }

    /// Set AML-defining flags that at least one of `taxonomies` admits at `blasts`.
    pub fn admitted_aml_defining(&self, blasts: f64, taxonomies: &[Taxonomy]) -> Vec<&str> {
        self.aml_defining
            .keys()
            .filter(|k| self.aml_defining.is_set(k))
            .filter(|k| taxonomies.iter().any(|t| t.profile().admits(k, blasts)))
            .collect()
    }

    /// Warnings for keys and values the evaluators will silently ignore.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        match self.blasts_percentage {
            None => warnings.push("blasts_percentage is missing".to_string()),
            Some(b) if b.is_nan() => {
                warnings.push("blasts_percentage is not a number".to_string())
            }
            Some(b) if !(0.0..=100.0).contains(&b) => {
                warnings.push(format!("blasts_percentage {} is outside [0, 100]", b))
            }
            Some(_) => {}
        }
        for key in self.aml_defining.keys() {
            if TaxonomyProfile::who_2022().abnormality(key).is_none()
                && TaxonomyProfile::icc_2022().abnormality(key).is_none()
            {
                warnings.push(format!("unknown AML-defining abnormality key '{}'", key));
            }
        }
        lint_keys(&mut warnings, &self.biallelic_tp53, TP53_CONDITIONS, "TP53 condition");
        lint_keys(
            &mut warnings,
            &self.mds_related_mutations,
            MDS_RELATED_GENES,
            "MDS-related mutation",
        );
        lint_keys(
            &mut warnings,
            &self.mds_related_cytogenetics,
            MDS_RELATED_CYTOGENETICS,
            "MDS-related cytogenetic",
        );
        warnings
    }
}

fn lint_keys(warnings: &mut Vec<String>, flags: &FlagMap, known: &[&str], what: &str) {
    for key in flags.keys() {
        if !known.contains(&key) {
            warnings.push(format!("unknown {} key '{}'", what, key));
        }
    }
}

fn raw_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(raw_value(deserializer)?.as_bool().unwrap_or(false))
}

fn lenient_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(raw_value(deserializer)?.as_str().map(str::to_string))
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let id = match raw_value(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    Ok(id)
}

fn lenient_blasts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let blasts = match raw_value(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    };
    Ok(blasts)
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = raw_value(deserializer)?;
    Ok(raw.as_u64().and_then(|n| u32::try_from(n).ok()))
}

fn lenient_qualifiers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Qualifiers, D::Error> {
    match raw_value(deserializer)? {
        value @ Value::Object(_) => Qualifiers::deserialize(value).map_err(de::Error::custom),
        _ => Ok(Qualifiers::default()),
    }
}

fn germline_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let entries = match raw_value(deserializer)? {
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}
