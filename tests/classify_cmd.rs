use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const TP53_CASE: &str = r#"{
    "case_id": "tp53-15",
    "blasts_percentage": 15,
    "Biallelic_TP53_mutation": {"2_x_TP53_mutations": true},
    "MDS_related_mutation": {"ASXL1": true}
}"#;

#[test]
fn classify_prints_labels() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("case.json");
    fs::write(&input, TP53_CASE).unwrap();

    let mut cmd = Command::cargo_bin("kira-myeloclass").unwrap();
    cmd.arg("classify")
        .arg("--input")
        .arg(&input)
        .args(["--family", "aml"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Case: tp53-15, blasts=15%, family=AML (AML requested)"));
    assert!(text.contains("WHO 2022: AML, myelodysplasia related (WHO 2022)"));
    assert!(text.contains("ICC 2022: AML with mutated TP53 (ICC 2022)"));
}

#[test]
fn classify_writes_requested_artifacts() {
    let tmp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = tmp.path().join("case.json.gz");
    {
        use std::io::Write;
        let file = fs::File::create(&input).unwrap();
        let mut gz = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        gz.write_all(TP53_CASE.as_bytes()).unwrap();
        gz.finish().unwrap();
    }

    let mut cmd = Command::cargo_bin("kira-myeloclass").unwrap();
    cmd.arg("classify")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(out.path())
        .args(["--taxonomy", "icc", "--family", "aml", "--json", "--dot"]);
    cmd.assert().success();

    let v: Value =
        serde_json::from_slice(&fs::read(out.path().join("myeloclass.json")).unwrap()).unwrap();
    assert_eq!(v["case_id"], "tp53-15");
    assert_eq!(v["results"].as_array().unwrap().len(), 1);
    assert_eq!(v["results"][0]["label"], "AML with mutated TP53 (ICC 2022)");

    let dot = fs::read_to_string(out.path().join("derivation_icc2022.dot")).unwrap();
    assert!(dot.contains("AML with mutated TP53 (ICC 2022)"));
    assert!(!out.path().join("derivation_who2022.dot").exists());
    assert!(!out.path().join("myeloclass.tsv").exists());
}

#[test]
fn classify_reports_missing_blasts_without_failing() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("case.json");
    fs::write(&input, r#"{"MDS_related_mutation": {"SF3B1": true}}"#).unwrap();

    let mut cmd = Command::cargo_bin("kira-myeloclass").unwrap();
    cmd.arg("classify").arg("--input").arg(&input);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(
        "WHO 2022: Error: blasts_percentage is missing. Please provide this information for classification."
    ));
    assert!(text.contains("- case: blasts_percentage is missing"));
}

#[test]
fn classify_rejects_jsonl_input() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("cases.jsonl");
    fs::write(&input, "{}\n").unwrap();

    let mut cmd = Command::cargo_bin("kira-myeloclass").unwrap();
    cmd.arg("classify").arg("--input").arg(&input);
    cmd.assert().failure();
}
