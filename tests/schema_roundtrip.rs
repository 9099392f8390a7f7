use kira_myeloclass::engine::taxonomy::Family;
use kira_myeloclass::schema::v1::MyeloClassV1;

#[test]
fn schema_roundtrip_v1() {
    let report = MyeloClassV1::empty("0.0.0-test", "case-1", Family::Mds);
    let json = serde_json::to_string(&report).unwrap();
    let decoded: MyeloClassV1 = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.tool, "kira-myeloclass");
    assert_eq!(decoded.schema_version, "v1");
    assert_eq!(decoded.case_id, "case-1");
    assert_eq!(decoded.input.family, Family::Mds);
    assert!(json.contains("\"family\":\"mds\""));
}
