//! Linear flow diagram of a derivation, as Graphviz DOT text.

use std::path::Path;

use anyhow::{Context, Result};

use crate::engine::ClassificationResult;

pub fn render_dot(result: &ClassificationResult) -> String {
    let mut out = String::new();
    out.push_str("digraph derivation {\n");
    out.push_str("    rankdir=TB;\n");
    out.push_str("    node [shape=box, style=rounded, fontname=\"Helvetica\"];\n");
    for (i, step) in result.derivation.iter().enumerate() {
        out.push_str(&format!("    step{} [label=\"{}\"];\n", i, escape(step)));
    }
    out.push_str(&format!(
        "    final [label=\"{}\", shape=doubleoctagon];\n",
        escape(&result.label)
    ));
    let mut prev: Option<String> = None;
    for i in 0..result.derivation.len() {
        let node = format!("step{}", i);
        if let Some(p) = &prev {
            out.push_str(&format!("    {} -> {};\n", p, node));
        }
        prev = Some(node);
    }
    if let Some(p) = prev {
        out.push_str(&format!("    {} -> final;\n", p));
    }
    out.push_str("}\n");
    out
}

pub fn write_dot(path: &Path, result: &ClassificationResult) -> Result<()> {
    std::fs::write(path, render_dot(result))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
