//! CSV roster codec for the Ringtoss prize-game ledger.
//!
//! The roster file is a CSV with a header row and the domain field
//! names used on the event's spreadsheet:
//!
//! ```text
//! employee_id,participant_name,level,reward
//! 001,Mei,3,500
//! 002,Ren,0,0
//! ```
//!
//! Decoding is deliberately permissive, matching the event's
//! hand-edited spreadsheets: a missing or unparseable `level` cell
//! becomes `None` (the ledger imports it as level 0), missing id and
//! name cells decode as empty strings, and the `reward` column is
//! ignored entirely -- rewards are derived from levels, never trusted
//! from a file. The codec does not validate against the budget; that
//! is the ledger's job.
//!
//! Encoding writes one row per participant record with the inverse
//! field mapping. Rewards are recomputed by the caller before the
//! records reach this crate.

use std::io::{Read, Write};

use ringtoss_types::{ParticipantRecord, RosterRow};

/// The header cell naming the participant-id column.
pub const FIELD_EMPLOYEE_ID: &str = "employee_id";
/// The header cell naming the display-name column.
pub const FIELD_PARTICIPANT_NAME: &str = "participant_name";
/// The header cell naming the level column.
pub const FIELD_LEVEL: &str = "level";
/// The header cell naming the derived-reward column.
pub const FIELD_REWARD: &str = "reward";

/// Errors that can occur while decoding or encoding a roster file.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The underlying CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a required column.
    #[error("roster file is missing the {0:?} column")]
    MissingColumn(&'static str),

    /// An I/O error outside the CSV layer (flushing the sink).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Positions of the recognized columns within the header row.
struct ColumnMap {
    id: usize,
    name: usize,
    level: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions from the header record.
    ///
    /// Id and name columns are required; the level column is optional
    /// (a roster of names alone imports everyone at level 0). Header
    /// cells are matched after trimming.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, RosterError> {
        let position = |field: &str| {
            headers
                .iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(field))
        };

        Ok(Self {
            id: position(FIELD_EMPLOYEE_ID)
                .ok_or(RosterError::MissingColumn(FIELD_EMPLOYEE_ID))?,
            name: position(FIELD_PARTICIPANT_NAME)
                .ok_or(RosterError::MissingColumn(FIELD_PARTICIPANT_NAME))?,
            level: position(FIELD_LEVEL),
        })
    }
}

/// Decode a roster file into import rows.
///
/// # Errors
///
/// Returns [`RosterError::Csv`] if the source is not well-formed CSV
/// and [`RosterError::MissingColumn`] if the header lacks the id or
/// name column. Individual cell problems never fail the decode; they
/// fall back per the permissive policy described at the crate root.
pub fn decode<R: Read>(reader: R) -> Result<Vec<RosterRow>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |index: usize| record.get(index).unwrap_or("").to_owned();

        rows.push(RosterRow {
            id: cell(columns.id),
            name: cell(columns.name),
            level: columns
                .level
                .and_then(|index| record.get(index))
                .and_then(|raw| raw.trim().parse::<u32>().ok()),
        });
    }

    Ok(rows)
}

/// Encode participant records as a roster file.
///
/// Writes the header row followed by one row per record, and flushes
/// the sink.
///
/// # Errors
///
/// Returns [`RosterError::Csv`] if writing a record fails and
/// [`RosterError::Io`] if the final flush fails.
pub fn encode<W: Write>(records: &[ParticipantRecord], writer: W) -> Result<(), RosterError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        FIELD_EMPLOYEE_ID,
        FIELD_PARTICIPANT_NAME,
        FIELD_LEVEL,
        FIELD_REWARD,
    ])?;

    for record in records {
        csv_writer.write_record([
            record.id.as_str(),
            record.name.as_str(),
            record.level.to_string().as_str(),
            record.reward.to_string().as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ringtoss_types::EmployeeId;

    use super::*;

    fn record(id: &str, name: &str, level: u32, reward: i64) -> ParticipantRecord {
        ParticipantRecord {
            id: EmployeeId::from(id),
            name: name.to_owned(),
            level,
            reward,
        }
    }

    #[test]
    fn decodes_a_well_formed_roster() {
        let csv = "employee_id,participant_name,level,reward\n001,Mei,3,500\n002,Ren,0,0\n";
        let rows = decode(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows.first().map(|r| r.id.as_str()), Some("001"));
        assert_eq!(rows.first().and_then(|r| r.level), Some(3));
        assert_eq!(rows.get(1).map(|r| r.name.as_str()), Some("Ren"));
    }

    #[test]
    fn unparseable_level_decodes_as_none() {
        let csv = "employee_id,participant_name,level\n001,Mei,three\n002,Ren,\n";
        let rows = decode(csv.as_bytes()).unwrap();

        assert_eq!(rows.first().and_then(|r| r.level), None);
        assert_eq!(rows.get(1).and_then(|r| r.level), None);
    }

    #[test]
    fn missing_level_column_imports_everyone_unleveled() {
        let csv = "employee_id,participant_name\n001,Mei\n";
        let rows = decode(csv.as_bytes()).unwrap();
        assert_eq!(rows.first().and_then(|r| r.level), None);
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let csv = "participant_name,level\nMei,1\n";
        assert!(matches!(
            decode(csv.as_bytes()),
            Err(RosterError::MissingColumn(FIELD_EMPLOYEE_ID))
        ));
    }

    #[test]
    fn reward_column_is_ignored_on_decode() {
        // A doctored reward cell has no effect; levels are authoritative.
        let csv = "employee_id,participant_name,level,reward\n001,Mei,1,999999\n";
        let rows = decode(csv.as_bytes()).unwrap();
        assert_eq!(rows.first().and_then(|r| r.level), Some(1));
    }

    #[test]
    fn column_order_and_header_case_do_not_matter() {
        let csv = "Level,PARTICIPANT_NAME,employee_id\n2,Mei,001\n";
        let rows = decode(csv.as_bytes()).unwrap();

        assert_eq!(rows.first().map(|r| r.id.as_str()), Some("001"));
        assert_eq!(rows.first().map(|r| r.name.as_str()), Some("Mei"));
        assert_eq!(rows.first().and_then(|r| r.level), Some(2));
    }

    #[test]
    fn short_row_decodes_with_empty_cells() {
        let csv = "employee_id,participant_name,level\n001\n";
        let rows = decode(csv.as_bytes()).unwrap();

        assert_eq!(rows.first().map(|r| r.id.as_str()), Some("001"));
        assert_eq!(rows.first().map(|r| r.name.as_str()), Some(""));
        assert_eq!(rows.first().and_then(|r| r.level), None);
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let records = vec![
            record("001", "Mei", 3, 500),
            record("002", "Ren", 0, 0),
            record("003", "Aiko", 1, 100),
        ];

        let mut buf = Vec::new();
        encode(&records, &mut buf).unwrap();
        let rows = decode(buf.as_slice()).unwrap();

        assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(row.id, record.id.as_str());
            assert_eq!(row.name, record.name);
            assert_eq!(row.level, Some(record.level));
        }
    }

    #[test]
    fn encode_writes_the_domain_header() {
        let mut buf = Vec::new();
        encode(&[record("001", "Mei", 2, 300)], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("employee_id,participant_name,level,reward"));
        assert!(text.contains("001,Mei,2,300"));
    }
}
