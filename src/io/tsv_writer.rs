use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;

pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "case_id\ttaxonomy\tfamily\tcategory\tlabel")?;
    for outcome in &ctx.outcomes {
        for result in &outcome.results {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}",
                clean(&outcome.id),
                result.taxonomy().name(),
                result.family().name(),
                result.classification.category.code(),
                clean(&result.label)
            )?;
        }
    }
    w.flush()?;
    Ok(())
}

fn clean(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}
