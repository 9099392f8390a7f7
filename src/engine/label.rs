//! Tagged classification and its rendering to the published label text.

use std::fmt;

use crate::engine::taxonomy::{AbnormalityEntry, Family, Taxonomy};

pub const MISSING_BLASTS_LABEL: &str =
    "Error: blasts_percentage is missing. Please provide this information for classification.";
pub const BLASTS_OUT_OF_RANGE_LABEL: &str =
    "Error: blasts_percentage must be a number between 0 and 100.";
pub const NOT_AML_LABEL: &str = "Not AML, consider MDS classification";
pub const WHO_AML_PLACEHOLDER: &str = "Acute myeloid leukaemia, [define by differentiation]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    MissingBlasts,
    BlastsOutOfRange(f64),
}

impl InputError {
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingBlasts => MISSING_BLASTS_LABEL,
            Self::BlastsOutOfRange(_) => BLASTS_OUT_OF_RANGE_LABEL,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBlasts => write!(f, "blasts_percentage is missing"),
            Self::BlastsOutOfRange(v) if v.is_nan() => {
                write!(f, "blasts_percentage is not a number")
            }
            Self::BlastsOutOfRange(v) => {
                write!(f, "blasts_percentage {} is outside [0, 100]", v)
            }
        }
    }
}

/// Checks the one numeric precondition shared by all evaluators.
pub fn checked_blasts(blasts: Option<f64>) -> Result<f64, InputError> {
    match blasts {
        None => Err(InputError::MissingBlasts),
        Some(v) if (0.0..=100.0).contains(&v) => Ok(v),
        Some(v) => Err(InputError::BlastsOutOfRange(v)),
    }
}

/// WHO 2022 AML defined by differentiation, keyed by FAB subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Differentiation {
    Minimal,
    WithoutMaturation,
    WithMaturation,
    Promyelocytic,
    Myelomonocytic,
    MyelomonocyticEosinophilia,
    Monoblastic,
    Monocytic,
    Erythroid,
    PureErythroid,
    Megakaryoblastic,
}

impl Differentiation {
    pub const FAB_CODES: &'static [(&'static str, Differentiation)] = &[
        ("M0", Self::Minimal),
        ("M1", Self::WithoutMaturation),
        ("M2", Self::WithMaturation),
        ("M3", Self::Promyelocytic),
        ("M4", Self::Myelomonocytic),
        ("M4Eo", Self::MyelomonocyticEosinophilia),
        ("M5a", Self::Monoblastic),
        ("M5b", Self::Monocytic),
        ("M6a", Self::Erythroid),
        ("M6b", Self::PureErythroid),
        ("M7", Self::Megakaryoblastic),
    ];

    /// Exact FAB code, ignoring case and surrounding whitespace.
    pub fn from_fab(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::FAB_CODES
            .iter()
            .find(|(fab, _)| fab.eq_ignore_ascii_case(code))
            .map(|(_, d)| *d)
    }

    pub fn is_erythroid(self) -> bool {
        matches!(self, Self::Erythroid | Self::PureErythroid)
    }

    pub fn who_label(self) -> &'static str {
        match self {
            Self::Minimal => "Acute myeloid leukaemia with minimal differentiation",
            Self::WithoutMaturation => "Acute myeloid leukaemia without maturation",
            Self::WithMaturation => "Acute myeloid leukaemia with maturation",
            Self::Promyelocytic => "Acute promyelocytic leukaemia",
            Self::Myelomonocytic => "Acute myelomonocytic leukaemia",
            Self::MyelomonocyticEosinophilia => {
                "Acute myelomonocytic leukaemia with eosinophilia"
            }
            Self::Monoblastic => "Acute monoblastic leukaemia",
            Self::Monocytic => "Acute monocytic leukaemia",
            Self::Erythroid => "Acute erythroid leukaemia",
            Self::PureErythroid => "Pure erythroid leukaemia",
            Self::Megakaryoblastic => "Acute megakaryoblastic leukaemia",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Category {
    InvalidInput(InputError),
    NotAml,
    RecurrentAbnormality(&'static AbnormalityEntry),
    MutatedTp53,
    MyelodysplasiaRelated,
    AmlDefault(Option<Differentiation>),
    MdsBiallelicTp53,
    MdsFibrotic,
    MdsIncreasedBlasts1,
    MdsIncreasedBlasts2,
    MdsSf3b1,
    MdsDel5q,
    MdsHypoplastic,
    MdsLowBlasts { multilineage: bool },
    MdsWithoutDysplasia,
    MdsUnclassified,
}

impl Category {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotAml => "not_aml",
            Self::RecurrentAbnormality(_) => "recurrent_genetic_abnormality",
            Self::MutatedTp53 => "mutated_tp53",
            Self::MyelodysplasiaRelated => "myelodysplasia_related",
            Self::AmlDefault(_) => "aml_default",
            Self::MdsBiallelicTp53 => "mds_tp53",
            Self::MdsFibrotic => "mds_fibrotic",
            Self::MdsIncreasedBlasts1 => "mds_blasts_5_9",
            Self::MdsIncreasedBlasts2 => "mds_blasts_10_19",
            Self::MdsSf3b1 => "mds_sf3b1",
            Self::MdsDel5q => "mds_del5q",
            Self::MdsHypoplastic => "mds_hypoplastic",
            Self::MdsLowBlasts { .. } => "mds_low_blasts",
            Self::MdsWithoutDysplasia => "mds_without_dysplasia",
            Self::MdsUnclassified => "mds_unclassified",
        }
    }

    pub fn text(&self, taxonomy: Taxonomy) -> &'static str {
        let who = taxonomy == Taxonomy::Who2022;
        match self {
            Self::InvalidInput(e) => e.label(),
            Self::NotAml => NOT_AML_LABEL,
            Self::RecurrentAbnormality(entry) => entry.label,
            Self::MutatedTp53 => "AML with mutated TP53",
            Self::MyelodysplasiaRelated if who => "AML, myelodysplasia related",
            Self::MyelodysplasiaRelated => "AML with myelodysplasia related gene mutation",
            Self::AmlDefault(Some(d)) if who => d.who_label(),
            Self::AmlDefault(None) if who => "Acute myeloid leukaemia, unknown differentiation",
            Self::AmlDefault(_) => "AML, NOS",
            Self::MdsBiallelicTp53 if who => "MDS with biallelic TP53 inactivation",
            Self::MdsBiallelicTp53 => "MDS with mutated TP53",
            Self::MdsFibrotic => "MDS, fibrotic",
            Self::MdsIncreasedBlasts1 if who => "MDS with increased blasts 1",
            Self::MdsIncreasedBlasts1 => "MDS with excess blasts",
            Self::MdsIncreasedBlasts2 if who => "MDS with increased blasts 2",
            Self::MdsIncreasedBlasts2 => "MDS/AML",
            Self::MdsSf3b1 if who => "MDS with low blasts and SF3B1",
            Self::MdsSf3b1 => "MDS with mutated SF3B1",
            Self::MdsDel5q if who => "MDS with low blasts and isolated 5q-",
            Self::MdsDel5q => "MDS with del(5q)",
            Self::MdsHypoplastic => "MDS, hypoplastic",
            Self::MdsLowBlasts { .. } if who => "MDS with low blasts",
            Self::MdsLowBlasts { multilineage: false } => "MDS, NOS with single lineage dysplasia",
            Self::MdsLowBlasts { multilineage: true } => "MDS, NOS with multilineage dysplasia",
            Self::MdsWithoutDysplasia => "MDS, NOS without dysplasia",
            Self::MdsUnclassified if who => "MDS, unclassifiable",
            Self::MdsUnclassified => "MDS, NOS",
        }
    }

    /// Redirect labels carry no qualifiers.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::NotAml)
    }

    /// ICC AML categories that become MDS/AML at 10-19% blasts. TP53-defined
    /// AML keeps its label at any blast count of 10% or more.
    pub fn converts_to_mds_aml(&self) -> bool {
        matches!(self, Self::MyelodysplasiaRelated | Self::AmlDefault(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    PriorCytotoxicTherapy,
    GermlinePredisposition(Vec<String>),
    ProgressedFromMds,
}

impl Qualifier {
    pub fn phrase(&self, taxonomy: Taxonomy, family: Family) -> String {
        match (self, taxonomy, family) {
            (Self::PriorCytotoxicTherapy, Taxonomy::Who2022, Family::Aml) => {
                "post cytotoxic therapy".to_string()
            }
            (Self::PriorCytotoxicTherapy, Taxonomy::Who2022, Family::Mds) => {
                "previous cytotoxic therapy".to_string()
            }
            (Self::PriorCytotoxicTherapy, Taxonomy::Icc2022, _) => "therapy related".to_string(),
            (Self::GermlinePredisposition(conditions), taxonomy, _) => format!(
                "{} {}",
                taxonomy.profile().germline_prefix,
                conditions.join(", ")
            ),
            (Self::ProgressedFromMds, Taxonomy::Who2022, _) => "progressed from MDS".to_string(),
            (Self::ProgressedFromMds, Taxonomy::Icc2022, Family::Aml) => {
                "arising post MDS".to_string()
            }
            (Self::ProgressedFromMds, Taxonomy::Icc2022, Family::Mds) => "post MDS".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub taxonomy: Taxonomy,
    pub family: Family,
    pub category: Category,
    pub qualifiers: Vec<Qualifier>,
    /// ICC 10-19% blasts: the leading "AML" of the label reads "MDS/AML".
    pub mds_aml: bool,
}

impl Classification {
    pub fn new(taxonomy: Taxonomy, family: Family, category: Category) -> Self {
        Self {
            taxonomy,
            family,
            category,
            qualifiers: Vec::new(),
            mds_aml: false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.category, Category::InvalidInput(_))
    }

    pub fn base_text(&self) -> String {
        let text = self.category.text(self.taxonomy);
        if self.mds_aml {
            text.replacen("AML", "MDS/AML", 1)
        } else {
            text.to_string()
        }
    }

    pub fn qualifier_phrases(&self) -> Vec<String> {
        self.qualifiers
            .iter()
            .map(|q| q.phrase(self.taxonomy, self.family))
            .collect()
    }

    pub fn render(&self) -> String {
        if let Category::InvalidInput(e) = self.category {
            return e.label().to_string();
        }
        let mut out = self.base_text();
        let phrases = self.qualifier_phrases();
        if !phrases.is_empty() {
            out.push_str(", ");
            out.push_str(&phrases.join(", "));
        }
        out.push(' ');
        out.push_str(self.taxonomy.tag());
        out
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
