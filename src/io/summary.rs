use std::collections::BTreeMap;

use anyhow::{Result, bail};

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx, explain: bool) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    out.push_str(&format!("kira-myeloclass v{}\n", version));

    if ctx.is_single_case() {
        let (case, outcome) = match (ctx.cases.first(), ctx.outcomes.first()) {
            (Some(c), Some(o)) => (c, o),
            _ => bail!("no classified case to summarise"),
        };
        let blasts = case
            .findings
            .blasts_percentage
            .map(|b| format!("{}%", b))
            .unwrap_or_else(|| "missing".to_string());
        out.push_str(&format!(
            "Case: {}, blasts={}, family={} ({})\n",
            case.id,
            blasts,
            outcome.family.name(),
            outcome.routing
        ));
        for result in &outcome.results {
            out.push_str(&format!("{}: {}\n", result.taxonomy().name(), result.label));
            if explain {
                for step in &result.derivation {
                    out.push_str(&format!("  - {}\n", step));
                }
            }
        }
    } else {
        let aml = ctx
            .outcomes
            .iter()
            .filter(|o| o.family == crate::engine::taxonomy::Family::Aml)
            .count();
        out.push_str(&format!(
            "Cases: {} (AML path {}, MDS path {})\n",
            ctx.outcomes.len(),
            aml,
            ctx.outcomes.len() - aml
        ));
        for &taxonomy in &ctx.taxonomies {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for result in ctx.outcomes.iter().flat_map(|o| &o.results) {
                if result.taxonomy() == taxonomy {
                    *counts.entry(result.classification.category.code()).or_default() += 1;
                }
            }
            let parts: Vec<String> = counts
                .iter()
                .map(|(code, n)| format!("{}={}", code, n))
                .collect();
            out.push_str(&format!("{}: {}\n", taxonomy.name(), parts.join(", ")));
        }
    }

    if ctx.warnings.is_empty() {
        out.push_str("Warnings: none\n");
    } else {
        out.push_str("Warnings:\n");
        for warning in &ctx.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }
    Ok(out)
}
