use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::chapters::ChapterRecord;
use crate::diagnostics::{Diagnosed, Diagnostic};
use crate::time::{ChapterTime, parse_time};

/// Writes one cell into a row value. `None` means the column or cell is absent.
pub type Transform<T> = fn(&mut T, Option<&str>);

/// Which columns to read and what to do with each cell.
pub struct ColumnMap<T> {
    columns: Vec<(&'static str, Transform<T>)>,
}

impl<T> ColumnMap<T> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, name: &'static str, transform: Transform<T>) -> Self {
        self.columns.push((name, transform));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }
}

impl<T> Default for ColumnMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads delimited text with a header row and builds one `T` per data row.
///
/// Every mapped column's transform runs for every row, in map order, so a
/// missing column still reaches its transform as `None`.
pub fn map_rows<T: Default, R: Read>(
    reader: R,
    delimiter: u8,
    columns: &ColumnMap<T>,
) -> anyhow::Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read header row")?.clone();
    let positions: Vec<Option<usize>> = columns
        .names()
        .map(|name| headers.iter().position(|header| header == name))
        .collect();

    for (name, position) in columns.names().zip(&positions) {
        if position.is_none() {
            log::debug!("Column \"{name}\" not present in header");
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read row")?;
        let mut row = T::default();

        for ((_, transform), position) in columns.columns.iter().zip(&positions) {
            let cell = position.and_then(|index| record.get(index));
            transform(&mut row, cell);
        }

        rows.push(row);
    }

    Ok(rows)
}

/// The chapter sheet layout: `title`, `startTime`, `endTime`.
pub fn chapter_columns() -> ColumnMap<ChapterRecord> {
    ColumnMap::<ChapterRecord>::new()
        .column("title", |record, cell| {
            record.title = cell.filter(|s| !s.is_empty()).map(str::to_owned);
        })
        .column("startTime", |record, cell| {
            record.start_time = parse_time(cell);
        })
        .column("endTime", |record, cell| {
            record.end_time = parse_time(cell);
        })
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

/// Loads chapter records from a CSV or TSV file.
///
/// Unparsable times are kept as [`ChapterTime::Invalid`] and reported as
/// warnings; only a missing or unreadable file fails.
pub fn read_chapters(path: impl AsRef<Path>) -> anyhow::Result<Diagnosed<Vec<ChapterRecord>>> {
    let path = path.as_ref();
    if !path.is_file() {
        anyhow::bail!("Chapter file not found: {}", path.display());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let records = map_rows(file, delimiter_for(path), &chapter_columns())
        .with_context(|| format!("Failed to read chapters from {}", path.display()))?;
    log::debug!("Read {} chapters from {}", records.len(), path.display());

    let mut diagnostics = Vec::new();
    for (index, record) in records.iter().enumerate() {
        for (column, time) in [("startTime", &record.start_time), ("endTime", &record.end_time)] {
            if let ChapterTime::Invalid(raw) = time {
                diagnostics.push(Diagnostic::warning(
                    Some(index),
                    format!("{column} \"{raw}\" is not a valid time"),
                ));
            }
        }
    }

    Ok(Diagnosed::new(records, diagnostics))
}
