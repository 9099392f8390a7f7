pub mod cli;
pub mod ctx;
pub mod engine;
pub mod io;
pub mod pipeline;
pub mod schema;

pub use engine::findings::ClinicalFindings;
pub use engine::taxonomy::{Family, Taxonomy};
pub use engine::{ClassificationResult, classify};
