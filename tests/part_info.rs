use assembly_bom::ToolError;
use assembly_bom::info::{
    InfoChanges, add_field, commit, display_label, ensure_required, normalize_field_name,
    parse_assignment, read_info,
};
use assembly_bom::model::{MetadataRecord, Part, PartKind, Property, PropertyKind};

fn bracket() -> Part {
    let mut part = Part::new("bracket", "Bracket", PartKind::Part);
    part.set_info("PartNumber", "BR-001");
    part.set_info("Material", "Steel");
    part.properties.push(Property {
        name: "Length".to_string(),
        group: "Dimensions".to_string(),
        kind: PropertyKind::String,
        value: "120".to_string(),
    });
    part.properties.push(Property {
        name: "Revision".to_string(),
        group: "PartInfo".to_string(),
        kind: PropertyKind::Integer,
        value: "3".to_string(),
    });
    part
}

fn required() -> Vec<String> {
    vec!["PartNumber".to_string(), "Supplier".to_string()]
}

#[test]
fn read_info_keeps_only_part_info_strings_in_order() {
    let record = read_info(&bracket());
    let pairs: Vec<(&str, &str)> = record.iter().collect();
    assert_eq!(pairs, vec![("PartNumber", "BR-001"), ("Material", "Steel")]);
}

#[test]
fn read_info_never_reports_reserved_keys() {
    let mut part = bracket();
    part.set_info("Name", "shadow");
    part.set_info("Quantity", "7");
    let record = read_info(&part);
    assert!(!record.contains_key("Name"));
    assert!(!record.contains_key("Quantity"));
}

#[test]
fn part_without_information_reads_empty() {
    let part = Part::new("plain", "Plain", PartKind::Body);
    assert!(read_info(&part).is_empty());
}

#[test]
fn ensure_required_adds_missing_fields_once() {
    let mut part = bracket();
    assert_eq!(ensure_required(&mut part, &required()), vec!["Supplier".to_string()]);
    assert!(ensure_required(&mut part, &required()).is_empty());
    assert_eq!(read_info(&part).get("Supplier"), Some(""));
}

#[test]
fn add_field_strips_whitespace() {
    let mut part = bracket();
    let name = add_field(&mut part, " Surface  Finish ").expect("field added");
    assert_eq!(name, "SurfaceFinish");
    assert_eq!(read_info(&part).get("SurfaceFinish"), Some(""));
    assert_eq!(normalize_field_name("a b\tc"), "abc");
}

#[test]
fn add_field_rejects_blank_reserved_and_duplicate_names() {
    let mut part = bracket();
    assert!(matches!(
        add_field(&mut part, "   "),
        Err(ToolError::InvalidFieldName(_))
    ));
    assert!(matches!(
        add_field(&mut part, "Quantity"),
        Err(ToolError::InvalidFieldName(_))
    ));
    assert!(matches!(
        add_field(&mut part, "Material"),
        Err(ToolError::DuplicateField { .. })
    ));
}

#[test]
fn commit_applies_values_and_deletions_together() {
    let mut part = bracket();
    ensure_required(&mut part, &required());
    let changes = InfoChanges::new()
        .set("Supplier", "Acme")
        .mark_for_deletion("Material");

    commit(&mut part, &changes, &required()).expect("changes committed");

    let expected: MetadataRecord = [("PartNumber", "BR-001"), ("Supplier", "Acme")]
        .into_iter()
        .collect();
    assert_eq!(read_info(&part), expected);
    assert!(part.property("Length").is_some());
}

#[test]
fn unmarked_deletions_are_ignored() {
    let mut part = bracket();
    let mut changes = InfoChanges::new();
    changes.delete.insert("Material".to_string(), false);
    assert!(changes.is_empty());

    commit(&mut part, &changes, &required()).expect("changes committed");
    assert_eq!(read_info(&part).get("Material"), Some("Steel"));
}

#[test]
fn failed_commit_leaves_part_untouched() {
    let mut part = bracket();
    let before = part.clone();

    let protected = InfoChanges::new()
        .set("Material", "Aluminium")
        .mark_for_deletion("PartNumber");
    assert!(matches!(
        commit(&mut part, &protected, &required()),
        Err(ToolError::ProtectedField { .. })
    ));
    assert_eq!(part, before);

    let unknown = InfoChanges::new().set("Colour", "Red");
    assert!(matches!(
        commit(&mut part, &unknown, &required()),
        Err(ToolError::UnknownField { .. })
    ));

    let not_info = InfoChanges::new().mark_for_deletion("Length");
    assert!(matches!(
        commit(&mut part, &not_info, &required()),
        Err(ToolError::UnknownField { .. })
    ));
    assert_eq!(part, before);
}

#[test]
fn display_label_splits_camel_case() {
    assert_eq!(display_label("PartNumber"), "Part Number");
    assert_eq!(display_label("Material"), "Material");
    assert_eq!(display_label("partNo"), "part No");
    assert_eq!(display_label("ID"), "I D");
}

#[test]
fn assignments_split_on_first_equals() {
    assert_eq!(
        parse_assignment("Note=a=b").expect("parsed"),
        ("Note".to_string(), "a=b".to_string())
    );
    assert_eq!(
        parse_assignment("Finish=").expect("parsed"),
        ("Finish".to_string(), String::new())
    );
    assert!(matches!(
        parse_assignment("novalue"),
        Err(ToolError::InvalidAssignment(_))
    ));
    assert!(matches!(
        parse_assignment("=x"),
        Err(ToolError::InvalidAssignment(_))
    ));
}

#[test]
fn metadata_record_serialises_in_insertion_order() {
    let record: MetadataRecord = [("Zeta", "1"), ("Alpha", "2")].into_iter().collect();
    let json = serde_json::to_string(&record).expect("serialised");
    assert_eq!(json, r#"{"Zeta":"1","Alpha":"2"}"#);

    let restored: MetadataRecord = serde_json::from_str(&json).expect("deserialised");
    assert_eq!(restored.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
}
