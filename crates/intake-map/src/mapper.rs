//! The field mapper.
//!
//! Copies values from a raw external record into a fresh canonical record,
//! driven entirely by the system's mapping table. The mapper never errors:
//! absent external paths are skipped and unmapped external fields are
//! dropped, leaving it to validation to complain about what is missing.

use intake_model::CanonicalRecord;
use serde_json::Value;
use tracing::debug;

use crate::table::MappingTable;

/// Map one raw external record into a canonical record.
///
/// Pure function of the table and the input; mapping the same record twice
/// yields identical output.
pub fn map_record(table: &MappingTable, raw: &Value) -> CanonicalRecord {
    let mut record = CanonicalRecord::new();
    let mut resolved = 0usize;

    for entry in table.entries() {
        if let Some(value) = entry.external.resolve(raw) {
            record.set(&entry.canonical, value.clone());
            resolved += 1;
        }
    }

    debug!(
        system = table.system_id(),
        resolved,
        total = table.len(),
        "mapped external record"
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_model::CanonicalPath;
    use serde_json::json;

    fn jane_table() -> MappingTable {
        MappingTable::from_pairs(
            "ats",
            [
                ("name", "personalInfo.fullName"),
                ("email_addresses[0].value", "personalInfo.email"),
                ("position.title", "applicationInfo.appliedPosition"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn maps_present_paths_and_skips_absent_ones() {
        let raw = json!({
            "name": "Jane Doe",
            "email_addresses": [{"value": "jane@x.com"}]
        });

        let record = map_record(&jane_table(), &raw);

        assert_eq!(
            record.get_str(&CanonicalPath::parse("personalInfo.fullName").unwrap()),
            Some("Jane Doe")
        );
        assert_eq!(
            record.get_str(&CanonicalPath::parse("personalInfo.email").unwrap()),
            Some("jane@x.com")
        );
        // position.title absent in the raw record: skipped, not an error
        assert_eq!(
            record.get(&CanonicalPath::parse("applicationInfo.appliedPosition").unwrap()),
            None
        );
        assert_eq!(record.field_count(), 2);
    }

    #[test]
    fn unmapped_external_fields_are_dropped() {
        let raw = json!({
            "name": "Jane Doe",
            "internal_score": 42,
            "email_addresses": [{"value": "jane@x.com"}]
        });

        let record = map_record(&jane_table(), &raw);
        assert_eq!(record.field_count(), 2);
    }

    #[test]
    fn empty_raw_record_maps_to_empty_canonical_record() {
        let record = map_record(&jane_table(), &json!({}));
        assert!(record.is_empty());
    }

    #[test]
    fn mapping_is_deterministic() {
        let raw = json!({
            "name": "Jane Doe",
            "email_addresses": [{"value": "jane@x.com"}],
            "position": {"title": "Engineer"}
        });
        let table = jane_table();

        let first = map_record(&table, &raw);
        let second = map_record(&table, &raw);
        assert_eq!(first, second);
    }
}
