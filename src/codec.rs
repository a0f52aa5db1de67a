//! Flat-file persistence for lot collections.
//!
//! One lot per line, no header:
//!
//! ```text
//! <name>,<capacity>,<occupied>
//! ```
//!
//! No quoting or escaping is performed, so a name containing a comma does not
//! survive a round trip. Reading is lenient: lines that do not hold exactly
//! three fields with integer counts are logged and skipped.

use crate::error::Result;
use crate::lot::Lot;
use crate::store::LotCollection;
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

/// Raw line as read from the data file, before integer validation.
#[derive(Debug)]
struct LotRecord<'r> {
    name: &'r str,
    capacity: &'r str,
    occupied: &'r str,
}

impl<'r> LotRecord<'r> {
    /// Splits a record into its three fields.
    ///
    /// Returns `None` if the field count is not exactly three.
    fn from_record(record: &'r StringRecord) -> Option<Self> {
        if record.len() != 3 {
            return None;
        }
        Some(LotRecord {
            name: &record[0],
            capacity: &record[1],
            occupied: &record[2],
        })
    }

    /// Parses the counts into a typed lot.
    ///
    /// Returns `None` if either count is not an integer. Signs are accepted.
    fn parse(&self) -> Option<Lot> {
        let capacity = self.capacity.trim().parse::<i64>().ok()?;
        let occupied = self.occupied.trim().parse::<i64>().ok()?;
        Some(Lot::new(self.name.trim_start(), capacity, occupied))
    }
}

/// Reads every valid lot from `reader`, in order.
///
/// Malformed lines, including lines that are not valid UTF-8, are skipped.
/// Only I/O failures are returned as errors. Unlike [`load`], this does not
/// fall back to the defaults; an input without valid lines yields an empty
/// collection.
pub fn read_lots<R: Read>(reader: R) -> Result<LotCollection> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut lots = Vec::new();
    let mut bytes = ByteRecord::new();

    while csv_reader.read_byte_record(&mut bytes)? {
        let line = bytes
            .position()
            .map(|p| p.line())
            .unwrap_or_default();

        let record = match StringRecord::from_byte_record(bytes.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!("Line {}: invalid UTF-8 ({}), skipping", line, e.utf8_error());
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        match LotRecord::from_record(&record) {
            Some(raw) => match raw.parse() {
                Some(lot) => lots.push(lot),
                None => warn!("Line {}: non-integer capacity or occupied, skipping", line),
            },
            None => warn!(
                "Line {}: expected 3 fields, found {}, skipping",
                line,
                record.len()
            ),
        }
    }

    Ok(LotCollection::new(lots))
}

/// Writes one `name,capacity,occupied` line per lot, in collection order.
pub fn write_lots<W: Write>(writer: W, lots: &LotCollection) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for lot in lots {
        csv_writer.serialize(lot)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Loads lots from `path`.
///
/// Falls back to [`LotCollection::default_lots`] when the file does not exist
/// or holds no valid lines.
pub fn load<P: AsRef<Path>>(path: P) -> Result<LotCollection> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("{} not found, using default lots", path.display());
            return Ok(LotCollection::default_lots());
        }
        Err(e) => return Err(e.into()),
    };

    let lots = read_lots(BufReader::new(file))?;
    if lots.is_empty() {
        info!("{} has no valid lots, using default lots", path.display());
        return Ok(LotCollection::default_lots());
    }

    info!("Loaded {} lots from {}", lots.len(), path.display());
    Ok(lots)
}

/// Overwrites `path` with `lots`.
pub fn save<P: AsRef<Path>>(path: P, lots: &LotCollection) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_lots(file, lots)?;
    info!("Saved {} lots to {}", lots.len(), path.display());
    Ok(())
}

/// Whitespace-only lines come through as a single blank field.
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty()) && record.len() <= 1
}
