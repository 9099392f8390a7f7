use std::fs;
use std::path::Path;

use kira_myeloclass::ctx::{Ctx, FamilySelection};
use kira_myeloclass::engine::taxonomy::Taxonomy;
use kira_myeloclass::io::summary::format_summary;
use kira_myeloclass::pipeline::Pipeline;
use tempfile::TempDir;

fn run(input: &Path, out: &Path) -> Ctx {
    let mut ctx = Ctx::new(
        input.to_path_buf(),
        out.to_path_buf(),
        Taxonomy::ALL.to_vec(),
        FamilySelection::Auto,
        false,
        false,
        false,
    );
    Pipeline::classify().run(&mut ctx).unwrap();
    ctx
}

#[test]
fn single_case_summary() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("patient7.json");
    fs::write(
        &input,
        r#"{"blasts_percentage": 60, "AML_defining_recurrent_genetic_abnormalities": {"NPM1": true}}"#,
    )
    .unwrap();
    let ctx = run(&input, tmp.path());

    let s = format_summary(&ctx, false).unwrap();
    assert!(s.starts_with("kira-myeloclass v"));
    assert!(s.contains("Case: patient7, blasts=60%, family=AML (blasts 60% >= 20%)"));
    assert!(s.contains("WHO 2022: AML with NPM1 mutation (WHO 2022)"));
    assert!(s.contains("ICC 2022: AML with mutated NPM1 (ICC 2022)"));
    assert!(s.contains("Warnings: none"));
    assert!(!s.contains("  - "));

    let explained = format_summary(&ctx, true).unwrap();
    assert!(explained.contains("  - AML-defining recurrent genetic abnormality: NPM1 detected"));
}

#[test]
fn batch_summary_counts_categories() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cases.jsonl");
    fs::write(
        &input,
        "{\"case_id\": \"a\", \"blasts_percentage\": 3, \"number_of_dysplastic_lineages\": 1}\n\
         {\"case_id\": \"b\", \"blasts_percentage\": 45}\n\
         {\"case_id\": \"c\"}\n",
    )
    .unwrap();
    let ctx = run(&input, tmp.path());

    let s = format_summary(&ctx, false).unwrap();
    assert!(s.contains("Cases: 3 (AML path 2, MDS path 1)"));
    assert!(s.contains("Warnings:\n- c: blasts_percentage is missing"));
    let who_line = s.lines().find(|l| l.starts_with("WHO 2022: ")).unwrap();
    assert!(who_line.contains("=1"));
}
