use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::ctx::{FamilySelection, RunMode};
use crate::engine::taxonomy::{Family, Taxonomy};

#[derive(Debug, Parser)]
#[command(
    name = "kira-myeloclass",
    version,
    about = "WHO 2022 / ICC 2022 classification of AML and MDS with derivation trails"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Classify(ClassifyArgs),
    Batch(BatchArgs),
    Validate(ValidateArgs),
    Rules(RulesArgs),
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long, help = "Findings record (.json, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = TaxonomyArg::Both)]
    pub taxonomy: TaxonomyArg,

    #[arg(long, value_enum, default_value_t = FamilyArg::Auto)]
    pub family: FamilyArg,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Write one derivation flow diagram (DOT) per taxonomy"
    )]
    pub dot: bool,

    #[arg(long, default_value_t = false, help = "Print the derivation under each label")]
    pub explain: bool,

    #[arg(long, value_enum, default_value_t = RunModeArg::Standalone)]
    pub run_mode: RunModeArg,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[arg(long, help = "One findings record per line (.jsonl, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = TaxonomyArg::Both)]
    pub taxonomy: TaxonomyArg,

    #[arg(long, value_enum, default_value_t = FamilyArg::Auto)]
    pub family: FamilyArg,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, value_enum, default_value_t = RunModeArg::Standalone)]
    pub run_mode: RunModeArg,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Findings record (.json) or records (.jsonl)")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    Show(RulesShowArgs),
}

#[derive(Debug, Args)]
pub struct RulesShowArgs {
    #[arg(long, value_enum, default_value_t = TaxonomyArg::Both)]
    pub taxonomy: TaxonomyArg,

    #[arg(long, value_enum, help = "Only one evaluator family (default: both)")]
    pub family: Option<FamilyArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaxonomyArg {
    Who,
    Icc,
    Both,
}

impl TaxonomyArg {
    pub fn taxonomies(self) -> Vec<Taxonomy> {
        match self {
            Self::Who => vec![Taxonomy::Who2022],
            Self::Icc => vec![Taxonomy::Icc2022],
            Self::Both => Taxonomy::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    Aml,
    Mds,
    Auto,
}

impl FamilyArg {
    pub fn selection(self) -> FamilySelection {
        match self {
            Self::Aml => FamilySelection::Fixed(Family::Aml),
            Self::Mds => FamilySelection::Fixed(Family::Mds),
            Self::Auto => FamilySelection::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunModeArg {
    Standalone,
    Pipeline,
}

impl RunModeArg {
    pub fn run_mode(self) -> RunMode {
        match self {
            Self::Standalone => RunMode::Standalone,
            Self::Pipeline => RunMode::Pipeline,
        }
    }
}
