//! Append-only CSV trade store.
//!
//! The file is the whole database: a fixed header row followed by one row
//! per trade in insertion order. Appends write a single row at the end of
//! the file; nothing is ever rewritten in place.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::JournalError;
use crate::trade::{parse_decimal, Direction, TradeRecord, DATE_FORMAT};

/// Column header, in file order.
pub const HEADER: [&str; 7] = ["Date", "Symbol", "Direction", "Entry", "Exit", "PnL", "Notes"];

/// Handle on the backing CSV file.
///
/// Writes take `&mut self`: within one process the borrow checker is the
/// single-writer guard. Separate processes writing the same file are not
/// coordinated.
#[derive(Debug, Clone)]
pub struct TradeStore {
    path: PathBuf,
}

impl TradeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with just the header if it does not exist yet.
    ///
    /// Returns `true` when the file was created. An existing file is left
    /// untouched, whatever it contains.
    pub fn ensure_initialized(&self) -> Result<bool, JournalError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| JournalError::io(parent, e))?;
        }

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(JournalError::io(&self.path, e)),
        };

        let mut wtr = writer(file);
        wtr.write_record(HEADER)
            .map_err(|e| self.csv_error(e))?;
        wtr.flush().map_err(|e| JournalError::io(&self.path, e))?;

        info!(path = %self.path.display(), "initialized trade journal");
        Ok(true)
    }

    /// Append one record as the last row of the file.
    ///
    /// The file must already exist; a missing file is an I/O error, not an
    /// invitation to create one.
    pub fn append(&mut self, record: &TradeRecord) -> Result<(), JournalError> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| JournalError::io(&self.path, e))?;

        let len = file
            .metadata()
            .map_err(|e| JournalError::io(&self.path, e))?
            .len();
        let needs_header = len == 0;
        let needs_line_break =
            !needs_header && !ends_with_newline(&mut file).map_err(|e| JournalError::io(&self.path, e))?;

        if needs_line_break {
            file.write_all(b"\n")
                .map_err(|e| JournalError::io(&self.path, e))?;
        }

        let mut wtr = writer(file);
        if needs_header {
            wtr.write_record(HEADER).map_err(|e| self.csv_error(e))?;
        }
        wtr.write_record(to_row(record))
            .map_err(|e| self.csv_error(e))?;
        wtr.flush().map_err(|e| JournalError::io(&self.path, e))?;

        info!(
            symbol = %record.symbol,
            direction = %record.direction,
            pnl = %record.pnl,
            "trade appended"
        );
        Ok(())
    }

    /// Read every record in file order.
    pub fn read_all(&self) -> Result<Vec<TradeRecord>, JournalError> {
        let file = File::open(&self.path).map_err(|e| JournalError::io(&self.path, e))?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file);

        let headers = rdr.headers().map_err(|e| self.csv_error(e))?.clone();
        let found: Vec<&str> = headers.iter().map(str::trim).collect();
        if found != HEADER {
            return Err(JournalError::parse(
                None,
                format!(
                    "expected header '{}', found '{}'",
                    HEADER.join(","),
                    found.join(",")
                ),
            ));
        }

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result.map_err(|e| self.csv_error(e))?;
            let line = row.position().map(|p| p.line());
            records.push(from_row(&row, line)?);
        }

        debug!(count = records.len(), "read trade journal");
        Ok(records)
    }

    fn csv_error(&self, err: csv::Error) -> JournalError {
        let line = err.position().map(|p| p.line());
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => JournalError::io(&self.path, source),
            _ => JournalError::parse(line, message),
        }
    }
}

fn writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file)
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn to_row(record: &TradeRecord) -> [String; 7] {
    [
        record.date.format(DATE_FORMAT).to_string(),
        record.symbol.clone(),
        record.direction.as_str().to_string(),
        record.entry.to_string(),
        record.exit.to_string(),
        record.pnl.to_string(),
        record.notes.clone(),
    ]
}

fn from_row(row: &csv::StringRecord, line: Option<u64>) -> Result<TradeRecord, JournalError> {
    // Width is enforced by the non-flexible reader.
    let field = |i: usize| row.get(i).unwrap_or_default();

    let date = chrono::NaiveDate::parse_from_str(field(0).trim(), DATE_FORMAT)
        .map_err(|_| JournalError::parse(line, format!("bad date '{}'", field(0))))?;
    let direction: Direction = field(2)
        .parse()
        .map_err(|reason: String| JournalError::parse(line, reason))?;
    let decimal = |i: usize, name: &str| {
        parse_decimal(field(i))
            .map_err(|_| JournalError::parse(line, format!("bad {name} '{}'", field(i))))
    };

    Ok(TradeRecord {
        date,
        symbol: field(1).to_string(),
        direction,
        entry: decimal(3, "entry")?,
        exit: decimal(4, "exit")?,
        pnl: decimal(5, "PnL")?,
        notes: field(6).to_string(),
    })
}
