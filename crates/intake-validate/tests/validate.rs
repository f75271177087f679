//! End-to-end map-then-validate scenarios.

use intake_map::{MappingTable, map_record};
use intake_schema::builtin_catalog;
use intake_validate::{ErrorKind, Validator};
use serde_json::json;

fn jane_raw() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email_addresses": [{"value": "jane@x.com"}]
    })
}

#[test]
fn mapped_record_with_required_fields_is_valid() {
    let registry = builtin_catalog();
    let table = MappingTable::from_pairs(
        "ats",
        [
            ("name", "personalInfo.fullName"),
            ("email_addresses[0].value", "personalInfo.email"),
            ("job.title", "applicationInfo.appliedPosition"),
        ],
    )
    .unwrap();
    table.validate(&registry).unwrap();

    let mut raw = jane_raw();
    raw["job"] = json!({"title": "Backend Engineer"});

    let record = map_record(&table, &raw);
    let result = Validator::new(&registry).validate(&record);
    assert!(result.valid, "unexpected errors: {:?}", result.errors);
}

#[test]
fn missing_applied_position_yields_exactly_one_error() {
    let registry = builtin_catalog();
    let table = MappingTable::from_pairs(
        "ats",
        [
            ("name", "personalInfo.fullName"),
            ("email_addresses[0].value", "personalInfo.email"),
            ("job.title", "applicationInfo.appliedPosition"),
        ],
    )
    .unwrap();

    let record = map_record(&table, &jane_raw());
    let result = Validator::new(&registry).validate(&record);

    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "applicationInfo.appliedPosition");
    assert_eq!(result.errors[0].kind, ErrorKind::MissingRequired);
}

#[test]
fn repeated_validation_of_same_mapping_is_stable() {
    let registry = builtin_catalog();
    let table =
        MappingTable::from_pairs("ats", [("name", "personalInfo.fullName")]).unwrap();

    let validator = Validator::new(&registry);
    let first = validator.validate(&map_record(&table, &jane_raw()));
    let second = validator.validate(&map_record(&table, &jane_raw()));
    assert_eq!(first, second);
}
