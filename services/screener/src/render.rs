use clap::ValueEnum;
use resume_screener::screening::ResultRow;
use std::io::{self, Write};

const FILE_COLUMN_WIDTH: usize = 32;
const STATUS_COLUMN_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned columns for a terminal
    Table,
    /// CSV with a header row
    Csv,
    /// One JSON object per line
    Json,
}

/// Streams result rows to `W` as they arrive, flushing after each one.
pub(crate) enum RowWriter<W: Write> {
    Table(W),
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> RowWriter<W> {
    pub(crate) fn new(format: OutputFormat, out: W) -> io::Result<Self> {
        let writer = match format {
            OutputFormat::Table => {
                let mut out = out;
                writeln!(
                    out,
                    "{:<file$} {:<status$} Missing Qualifications",
                    "File Name",
                    "Status",
                    file = FILE_COLUMN_WIDTH,
                    status = STATUS_COLUMN_WIDTH
                )?;
                RowWriter::Table(out)
            }
            OutputFormat::Csv => RowWriter::Csv(csv::Writer::from_writer(out)),
            OutputFormat::Json => RowWriter::Json(out),
        };
        Ok(writer)
    }

    pub(crate) fn write_row(&mut self, row: &ResultRow) -> io::Result<()> {
        match self {
            RowWriter::Table(out) => {
                writeln!(
                    out,
                    "{:<file$} {:<status$} {}",
                    row.file_name,
                    row.status,
                    row.missing,
                    file = FILE_COLUMN_WIDTH,
                    status = STATUS_COLUMN_WIDTH
                )?;
                out.flush()
            }
            RowWriter::Csv(writer) => {
                writer.serialize(row)?;
                writer.flush()
            }
            RowWriter::Json(out) => {
                serde_json::to_writer(&mut *out, row)?;
                writeln!(out)?;
                out.flush()
            }
        }
    }

    pub(crate) fn into_inner(self) -> io::Result<W> {
        match self {
            RowWriter::Table(out) | RowWriter::Json(out) => Ok(out),
            RowWriter::Csv(writer) => writer.into_inner().map_err(|err| err.into_error()),
        }
    }
}
