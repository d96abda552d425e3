//! Delimited text loader.
//!
//! The source is read fully into memory by a helper thread (the loader
//! watches the cancellation token and deadline while it waits), decoded as UTF-8, then parsed by the Arrow CSV
//! reader into all-`Utf8` record batches. Cells are typed per batch in
//! parallel and stitched back in source order.

use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder as CsvReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_array::{Array, StringArray};
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::errors::{LoadError, ParseError};
use crate::inference::parse_column;
use crate::readers::{CancellationToken, LoaderConfig};
use crate::table::Table;
use crate::types::Cell;

/// Chunks buffered between the source thread and the loader
const CHANNEL_CAPACITY: usize = 8;

/// Longest wait on the chunk channel before re-checking the token
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Load a table from in-memory text with the default configuration.
pub fn load(source: &str) -> Result<Table, LoadError> {
    load_bytes(source.as_bytes(), &LoaderConfig::default())
}

/// Load a table from in-memory bytes.
pub fn load_bytes(source: &[u8], config: &LoaderConfig) -> Result<Table, LoadError> {
    parse_source(source, config, &CancellationToken::new(), None)
}

/// Load a table from a file on disk.
pub fn load_path<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Table, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening source");
    let file = File::open(path)?;
    load_reader(file, config, &CancellationToken::new())
}

/// Load a table from a pipe or stream.
///
/// The source is drained on a helper thread; this thread waits on the chunk
/// channel and fails with [`LoadError::Cancelled`] as soon as `token` is
/// cancelled or the configured timeout elapses, even while a read is blocked.
/// No partial table is ever returned. An abandoned helper exits once its
/// pending read returns.
pub fn load_reader<R: Read + Send + 'static>(
    reader: R,
    config: &LoaderConfig,
    token: &CancellationToken,
) -> Result<Table, LoadError> {
    let deadline = config.timeout().map(|t| Instant::now() + t);
    let chunks = spawn_chunk_reader(reader, config.read_chunk_size())?;

    let mut bytes = Vec::new();
    loop {
        check_cancelled(token, deadline)?;
        let wait = deadline
            .map(|d| d.saturating_duration_since(Instant::now()).min(POLL_INTERVAL))
            .unwrap_or(POLL_INTERVAL);
        match chunks.recv_timeout(wait) {
            Ok(Ok(chunk)) if chunk.is_empty() => break,
            Ok(Ok(chunk)) => bytes.extend_from_slice(&chunk),
            Ok(Err(e)) => return Err(LoadError::IoError(e)),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                return Err(LoadError::IoError(io::Error::other(
                    "source reader stopped before end of input",
                )))
            }
        }
    }
    // A cancel that raced the final read still wins.
    check_cancelled(token, deadline)?;
    parse_source(&bytes, config, token, deadline)
}

/// Read `reader` to the end on its own thread. An empty chunk marks EOF.
fn spawn_chunk_reader<R: Read + Send + 'static>(
    mut reader: R,
    chunk_size: usize,
) -> Result<Receiver<io::Result<Vec<u8>>>, LoadError> {
    let (sender, receiver) = bounded(CHANNEL_CAPACITY);
    thread::Builder::new()
        .name("datacheck-source".to_string())
        .spawn(move || {
            let mut chunk = vec![0u8; chunk_size];
            loop {
                let message = match reader.read(&mut chunk) {
                    Ok(0) => {
                        let _ = sender.send(Ok(Vec::new()));
                        return;
                    }
                    Ok(n) => Ok(chunk[..n].to_vec()),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => Err(e),
                };
                let failed = message.is_err();
                if sender.send(message).is_err() || failed {
                    return;
                }
            }
        })?;
    Ok(receiver)
}

fn check_cancelled(token: &CancellationToken, deadline: Option<Instant>) -> Result<(), LoadError> {
    if token.is_cancelled() {
        return Err(LoadError::Cancelled("cancelled by caller".to_string()));
    }
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            return Err(LoadError::Cancelled("timeout elapsed".to_string()));
        }
    }
    Ok(())
}

fn parse_source(
    source: &[u8],
    config: &LoaderConfig,
    token: &CancellationToken,
    deadline: Option<Instant>,
) -> Result<Table, LoadError> {
    check_cancelled(token, deadline)?;
    std::str::from_utf8(source).map_err(ParseError::from)?;

    let columns = read_header(source, config)?;
    debug!(columns = columns.len(), "header parsed");

    let batches = read_batches(source, &columns, config, token, deadline)?;
    let rows = batches_to_rows(&batches)?;

    let table = Table::new(columns, rows)?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "table loaded"
    );
    Ok(table)
}

/// Header names, verbatim (no trimming).
fn read_header(source: &[u8], config: &LoaderConfig) -> Result<Vec<String>, LoadError> {
    let format = Format::default()
        .with_header(true)
        .with_delimiter(config.delimiter);
    let (schema, _) = format.infer_schema(Cursor::new(source), Some(0))?;
    let columns: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    Table::check_header(&columns)?;
    Ok(columns)
}

fn read_batches(
    source: &[u8],
    columns: &[String],
    config: &LoaderConfig,
    token: &CancellationToken,
    deadline: Option<Instant>,
) -> Result<Vec<RecordBatch>, LoadError> {
    let fields: Vec<Field> = columns
        .iter()
        .map(|c| Field::new(c, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let reader = CsvReaderBuilder::new(schema)
        .with_header(true)
        .with_delimiter(config.delimiter)
        .with_batch_size(config.batch_size)
        .build(Cursor::new(source))?;

    let mut batches = Vec::new();
    for batch in reader {
        check_cancelled(token, deadline)?;
        batches.push(batch?);
    }
    Ok(batches)
}

fn batches_to_rows(batches: &[RecordBatch]) -> Result<Vec<Vec<Cell>>, LoadError> {
    let per_batch = batches
        .par_iter()
        .map(batch_to_rows)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(per_batch.into_iter().flatten().collect())
}

fn batch_to_rows(batch: &RecordBatch) -> Result<Vec<Vec<Cell>>, LoadError> {
    let mut columns = Vec::with_capacity(batch.num_columns());
    for (i, array) in batch.columns().iter().enumerate() {
        let strings = array
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                ParseError::Malformed(format!(
                    "column {} decoded as {} instead of text",
                    i,
                    array.data_type()
                ))
            })?;
        columns.push(parse_column(strings).into_iter());
    }

    let mut rows = Vec::with_capacity(batch.num_rows());
    for _ in 0..batch.num_rows() {
        let row: Vec<Cell> = columns
            .iter_mut()
            .map(|col| col.next().unwrap_or(Cell::Null))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
