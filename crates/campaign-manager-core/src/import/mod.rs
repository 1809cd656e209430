//! CSV importer
//!
//! Deliberately naive: lines are split on `\n` and fields on `,` with no
//! quoting or escaping, so a value containing a comma shifts every field
//! after it. Input is expected in the shape spreadsheet exports produce for
//! simple numeric/label columns.

use serde::Serialize;
use serde_json::Value;
use crate::constants::OWNER_FIELD;
use crate::records::RecordService;
use crate::storage::PropertyStore;
use crate::types::{Error, Record, RecordKind, Result};
use crate::log_info;

/// Message for input without a header row and at least one data row
pub const EMPTY_OR_INVALID: &str = "The CSV file is empty or invalid.";

/// Message for an unrecognized type tag
pub const INVALID_TYPE: &str = "Invalid CSV type.";

/// Result of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Collection the rows were appended to
    pub kind: RecordKind,
    /// Number of rows appended
    pub imported: usize,
}

impl ImportReport {
    /// Caller-facing confirmation
    pub fn message(&self) -> String {
        format!("CSV file for {} imported successfully.", self.kind.plural_label())
    }
}

/// Parse `text` and append its rows to the collection named by `tag`.
///
/// Headers and values are trimmed; missing trailing values become `""`.
/// Every row is stamped with the owner, and rows whose ID field is absent or
/// empty get a fresh synthetic ID. Existing IDs are kept as imported text.
pub fn import_csv<S: PropertyStore>(
    service: &RecordService<S>,
    text: &str,
    tag: &str,
) -> Result<ImportReport> {
    let mut lines = text.split('\n');
    let header_line = lines.next().unwrap_or_default();
    let data_lines: Vec<&str> = lines.map(str::trim).filter(|line| !line.is_empty()).collect();

    if data_lines.is_empty() {
        return Err(Error::invalid_input(EMPTY_OR_INVALID));
    }
    let kind = RecordKind::from_tag(tag).ok_or_else(|| Error::invalid_input(INVALID_TYPE))?;

    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
    let owner = service.space().user().as_str().to_string();

    let rows: Vec<Record> = data_lines
        .into_iter()
        .map(|line| {
            let mut row = parse_row(&headers, line);
            row.insert(OWNER_FIELD.to_string(), Value::from(owner.clone()));
            if row_needs_id(&row, kind) {
                row.insert(kind.id_field().to_string(), Value::from(service.next_id()));
            }
            row
        })
        .collect();

    let imported = service.append(kind, rows)?;
    log_info!("Imported {} {} row(s) for {}", imported, kind.label(), service.space().user());
    Ok(ImportReport { kind, imported })
}

/// Zip one data line against the headers, positionally
fn parse_row(headers: &[&str], line: &str) -> Record {
    let mut values = line.split(',').map(str::trim);
    headers
        .iter()
        .map(|header| {
            let value = values.next().unwrap_or_default();
            (header.to_string(), Value::from(value))
        })
        .collect()
}

fn row_needs_id(row: &Record, kind: RecordKind) -> bool {
    match row.get(kind.id_field()) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryPropertyStore, UserSpace};
    use crate::types::{IdGenerator, UserId};
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> RecordService<MemoryPropertyStore> {
        let store = Arc::new(MemoryPropertyStore::new());
        let space = UserSpace::new(UserId::new("agent@example.com").unwrap(), store);
        RecordService::new(space, Arc::new(IdGenerator::new()))
    }

    #[test]
    fn imports_single_campaign_row() {
        let svc = service();
        let report = import_csv(&svc, "Name,Budget\nTest,100\n", "campaigns").unwrap();
        assert_eq!(report, ImportReport { kind: RecordKind::Campaign, imported: 1 });
        assert_eq!(report.message(), "CSV file for Campaigns imported successfully.");

        let listed = svc.list(RecordKind::Campaign);
        assert_eq!(listed.len(), 1);
        let row = &listed[0];
        assert_eq!(row["Name"], json!("Test"));
        assert_eq!(row["Budget"], json!("100"));
        assert_eq!(row["User"], json!("agent@example.com"));
        assert!(row["Campaign ID"].is_i64());
    }

    #[test]
    fn header_only_input_is_rejected_without_writing() {
        let svc = service();
        for text in ["Name,Budget", "Name,Budget\n", "Name,Budget\n \n\r\n", ""] {
            let err = import_csv(&svc, text, "ads").unwrap_err();
            assert_eq!(err.to_string(), EMPTY_OR_INVALID);
        }
        assert!(svc.list(RecordKind::Ad).is_empty());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let svc = service();
        let err = import_csv(&svc, "Name\nx\n", "keywords").unwrap_err();
        assert_eq!(err.to_string(), INVALID_TYPE);
        for kind in RecordKind::ALL {
            assert!(svc.list(kind).is_empty());
        }
    }

    #[test]
    fn trims_pads_and_truncates_fields() {
        let svc = service();
        import_csv(&svc, " Name , Budget ,Start Date\r\n  Spring ,  250  \r\nSummer,1,2,3\r\n", "adsets")
            .unwrap();
        let listed = svc.list(RecordKind::AdSet);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["Name"], json!("Spring"));
        assert_eq!(listed[0]["Budget"], json!("250"));
        assert_eq!(listed[0]["Start Date"], json!(""));
        assert_eq!(listed[1]["Start Date"], json!("2"));
        assert_eq!(listed[1].len(), 5);
    }

    #[test]
    fn quoted_commas_are_not_special() {
        let svc = service();
        import_csv(&svc, "Name,Clicks\n\"Homes, Austin\",40\n", "ads").unwrap();
        let row = &svc.list(RecordKind::Ad)[0];
        assert_eq!(row["Name"], json!("\"Homes"));
        assert_eq!(row["Clicks"], json!("Austin\""));
    }

    #[test]
    fn keeps_supplied_ids_and_fills_blank_ones() {
        let svc = service();
        import_csv(&svc, "Ad ID,Name\nAD-1,first\n,second\n", "ads").unwrap();
        let listed = svc.list(RecordKind::Ad);
        assert_eq!(listed[0]["Ad ID"], json!("AD-1"));
        assert!(listed[1]["Ad ID"].is_i64());
    }

    #[test]
    fn batch_rows_get_distinct_ids_and_append() {
        let svc = service();
        svc.add(RecordKind::Campaign, Record::new()).unwrap();
        let csv: String = std::iter::once("Name".to_string())
            .chain((0..20).map(|i| format!("row{}", i)))
            .collect::<Vec<_>>()
            .join("\n");
        import_csv(&svc, &csv, "campaigns").unwrap();

        let listed = svc.list(RecordKind::Campaign);
        assert_eq!(listed.len(), 21);
        let mut ids: Vec<i64> = listed.iter().map(|r| r["Campaign ID"].as_i64().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 21);
    }

    #[test]
    fn imported_ids_are_addressable() {
        let svc = service();
        import_csv(&svc, "Campaign ID,Clicks\n77,5\n", "campaigns").unwrap();
        svc.update(
            RecordKind::Campaign,
            &crate::types::RecordId::from(77),
            serde_json::from_value(json!({"Clicks": "9"})).unwrap(),
        )
        .unwrap();
        assert_eq!(svc.list(RecordKind::Campaign)[0]["Clicks"], json!("9"));
    }
}
