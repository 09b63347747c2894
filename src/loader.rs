use std::{fs::File, io::BufReader, path::Path};

use crate::{
    error::{StoryreelError, StoryreelResult},
    model::EventRecord,
};

/// Header names consumed by the renderer, matched case-sensitively.
pub const DATE_COLUMN: &str = "Date";
pub const TITLE_COLUMN: &str = "Event title";
pub const TIME_COLUMN: &str = "Time";

/// Reads a delimited event table into records, in file order.
///
/// The first row is the header. Every other column is carried along in
/// `extra` without interpretation. Rows with the wrong field count are kept
/// with whatever best-effort mapping the reader produces (missing trailing
/// fields become empty strings).
pub fn read_events(path: &Path) -> StoryreelResult<Vec<EventRecord>> {
    let file = File::open(path).map_err(|e| {
        StoryreelError::input(format!("open event table '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| StoryreelError::input(format!("read header row: {e}")))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StoryreelError::input(format!("read event row: {e}")))?;

        let mut record = EventRecord {
            date: String::new(),
            title: String::new(),
            time: String::new(),
            extra: Default::default(),
        };

        for (i, header) in headers.iter().enumerate() {
            let value = row.get(i).unwrap_or_default();
            match header {
                DATE_COLUMN => record.date = value.to_string(),
                TITLE_COLUMN => record.title = value.to_string(),
                TIME_COLUMN => record.time = value.to_string(),
                _ => {
                    record.extra.insert(header.to_string(), value.to_string());
                }
            }
        }

        records.push(record);
    }

    tracing::debug!(path = %path.display(), count = records.len(), "loaded event records");
    Ok(records)
}
