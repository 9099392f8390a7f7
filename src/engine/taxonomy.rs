use serde::{Deserialize, Serialize};

use crate::engine::findings::PriorTherapy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    Who2022,
    Icc2022,
}

impl Taxonomy {
    pub const ALL: [Taxonomy; 2] = [Taxonomy::Who2022, Taxonomy::Icc2022];

    pub fn name(self) -> &'static str {
        match self {
            Self::Who2022 => "WHO 2022",
            Self::Icc2022 => "ICC 2022",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Who2022 => "(WHO 2022)",
            Self::Icc2022 => "(ICC 2022)",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Who2022 => "who2022",
            Self::Icc2022 => "icc2022",
        }
    }

    pub fn profile(self) -> &'static TaxonomyProfile {
        match self {
            Self::Who2022 => TaxonomyProfile::who_2022(),
            Self::Icc2022 => TaxonomyProfile::icc_2022(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Aml,
    Mds,
}

impl Family {
    pub fn name(self) -> &'static str {
        match self {
            Self::Aml => "AML",
            Self::Mds => "MDS",
        }
    }
}

/// One AML-defining genetic abnormality as a taxonomy names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbnormalityEntry {
    pub key: &'static str,
    pub label: &'static str,
    /// Only AML-defining at or above the profile's acute blast threshold.
    pub acute_only: bool,
}

const fn entry(key: &'static str, label: &'static str) -> AbnormalityEntry {
    AbnormalityEntry {
        key,
        label,
        acute_only: false,
    }
}

const fn acute(key: &'static str, label: &'static str) -> AbnormalityEntry {
    AbnormalityEntry {
        key,
        label,
        acute_only: true,
    }
}

/// Everything that differs between the two taxonomies apart from rule order.
#[derive(Debug)]
pub struct TaxonomyProfile {
    pub taxonomy: Taxonomy,
    pub acute_blast_threshold: f64,
    pub accepted_therapies: &'static [PriorTherapy],
    pub unrecognised_germline: &'static [&'static str],
    pub germline_prefix: &'static str,
    /// Checked in order; the first set flag that is admissible wins.
    pub aml_defining: &'static [AbnormalityEntry],
}

static WHO_2022: TaxonomyProfile = TaxonomyProfile {
    taxonomy: Taxonomy::Who2022,
    acute_blast_threshold: 20.0,
    accepted_therapies: &[
        PriorTherapy::IonisingRadiation,
        PriorTherapy::CytotoxicChemotherapy,
        PriorTherapy::AnyCombination,
    ],
    unrecognised_germline: &["Diamond-Blackfan anemia"],
    germline_prefix: "associated with",
    aml_defining: &[
        entry("PML::RARA", "Acute promyelocytic leukaemia with PML::RARA fusion"),
        entry("NPM1", "AML with NPM1 mutation"),
        entry("RUNX1::RUNX1T1", "AML with RUNX1::RUNX1T1 fusion"),
        entry("CBFB::MYH11", "AML with CBFB::MYH11 fusion"),
        entry("DEK::NUP214", "AML with DEK::NUP214 fusion"),
        entry("RBM15::MRTFA", "AML with RBM15::MRTFA fusion"),
        entry("MLLT3::KMT2A", "AML with KMT2A rearrangement"),
        entry("GATA2::MECOM", "AML with MECOM rearrangement"),
        entry("NUP98", "AML with NUP98 rearrangement"),
        entry("CEBPA", "AML with CEBPA mutation"),
        acute("KMT2A", "AML with KMT2A rearrangement"),
        acute("MECOM", "AML with MECOM rearrangement"),
        acute("bZIP", "AML with CEBPA mutation"),
        acute("BCR::ABL1", "AML with BCR::ABL1 fusion"),
    ],
};

const ICC_RARE_TRANSLOCATIONS: &str = "AML with other rare recurring translocations";
const ICC_OTHER_RARA: &str = "APL with other RARA rearrangements";
const ICC_STAT_RARA: &str =
    "APL with cryptic inv(17q) or del(17)(q21.2q21.2)/STAT5B::RARA, STAT3::RARA";

static ICC_2022: TaxonomyProfile = TaxonomyProfile {
    taxonomy: Taxonomy::Icc2022,
    acute_blast_threshold: 10.0,
    accepted_therapies: &[
        PriorTherapy::IonisingRadiation,
        PriorTherapy::CytotoxicChemotherapy,
        PriorTherapy::ImmuneInterventions,
        PriorTherapy::AnyCombination,
    ],
    unrecognised_germline: &["germline BLM mutation"],
    germline_prefix: "in the setting of",
    aml_defining: &[
        entry("PML::RARA", "APL with t(15;17)(q24.1;q21.2)/PML::RARA"),
        entry("IRF2BP2::RARA", "APL with t(1;17)(q42.3;q21.2)/IRF2BP2::RARA"),
        entry("NPM1::RARA", "APL with t(5;17)(q35.1;q21.2)/NPM1::RARA"),
        entry("ZBTB16::RARA", "APL with t(11;17)(q23.2;q21.2)/ZBTB16::RARA"),
        entry("STAT5B::RARA", ICC_STAT_RARA),
        entry("STAT3::RARA", ICC_STAT_RARA),
        entry("RARA::TBL1XR1", ICC_OTHER_RARA),
        entry("RARA::FIP1L1", ICC_OTHER_RARA),
        entry("RARA::BCOR", ICC_OTHER_RARA),
        entry("RUNX1::RUNX1T1", "AML with t(8;21)(q22;q22.1)/RUNX1::RUNX1T1"),
        entry(
            "CBFB::MYH11",
            "AML with inv(16)(p13.1q22) or t(16;16)(p13.1;q22)/CBFB::MYH11",
        ),
        entry("DEK::NUP214", "AML with t(6;9)(p22.3;q34.1)/DEK::NUP214"),
        entry("RBM15::MRTFA", "AML with t(1;22)(p13.3;q13.1)/RBM15::MRTFA"),
        entry("MLLT3::KMT2A", "AML with t(9;11)(p21.3;q23.3)/MLLT3::KMT2A"),
        entry(
            "GATA2::MECOM",
            "AML with inv(3)(q21.3q26.2) or t(3;3)(q21.3;q26.2)/GATA2, MECOM(EVI1)",
        ),
        entry("KMT2A", "AML with other KMT2A rearrangements"),
        entry("MECOM", "AML with other MECOM rearrangements"),
        entry("NUP98", ICC_RARE_TRANSLOCATIONS),
        entry("PRDM16::RPN1", ICC_RARE_TRANSLOCATIONS),
        entry("NPM1::MLF1", ICC_RARE_TRANSLOCATIONS),
        entry("KAT6A::CREBBP", ICC_RARE_TRANSLOCATIONS),
        entry("CBFA2T3::GLIS2", ICC_RARE_TRANSLOCATIONS),
        entry("FUS::ERG", ICC_RARE_TRANSLOCATIONS),
        entry("MNX1::ETV6", ICC_RARE_TRANSLOCATIONS),
        entry("NPM1", "AML with mutated NPM1"),
        entry("CEBPA", "AML with in-frame bZIP mutated CEBPA"),
        acute("bZIP", "AML with in-frame bZIP mutated CEBPA"),
        acute("BCR::ABL1", "AML with t(9;22)(q34.1;q11.2)/BCR::ABL1"),
    ],
};

impl TaxonomyProfile {
    pub fn who_2022() -> &'static Self {
        &WHO_2022
    }

    pub fn icc_2022() -> &'static Self {
        &ICC_2022
    }

    pub fn abnormality(&self, key: &str) -> Option<&'static AbnormalityEntry> {
        let table: &'static [AbnormalityEntry] = self.aml_defining;
        table.iter().find(|e| e.key == key)
    }

    /// Whether a set flag for `key` is AML-defining at `blasts` under this taxonomy.
    pub fn admits(&self, key: &str, blasts: f64) -> bool {
        self.abnormality(key)
            .is_some_and(|e| !e.acute_only || blasts >= self.acute_blast_threshold)
    }

    pub fn accepts_therapy(&self, therapy: PriorTherapy) -> bool {
        self.accepted_therapies.contains(&therapy)
    }

    pub fn recognises_germline(&self, condition: &str) -> bool {
        !self
            .unrecognised_germline
            .iter()
            .any(|u| u.eq_ignore_ascii_case(condition))
    }
}
