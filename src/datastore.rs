//! Storage of recorded path sample matrices

use nalgebra::DMatrix;
use std::path::Path as FilePath;

use crate::correction_error::CorrectionError;

pub use crate::path::split_data;

/// Persistent storage of sample matrices.
pub trait DataStore {
    fn retrieve(&self, file: &FilePath) -> Result<DMatrix<f64>, CorrectionError>;
    fn store(&self, data: &DMatrix<f64>, file: &FilePath) -> Result<(), CorrectionError>;
}

/// Delimited text matrices: one sample per line, no header. Lines starting
/// with `#` are skipped. Runs of the delimiter count as one, so space aligned
/// columns read as well.
#[cfg(feature = "allow_filesystem")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDataStore {
    pub delimiter: u8,
}

#[cfg(feature = "allow_filesystem")]
impl Default for TextDataStore {
    fn default() -> Self {
        TextDataStore { delimiter: b' ' }
    }
}

#[cfg(feature = "allow_filesystem")]
impl TextDataStore {
    pub fn with_delimiter(delimiter: u8) -> Self {
        TextDataStore { delimiter }
    }

    fn reader<R: std::io::Read>(&self, source: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source)
    }

    /// Reads all samples. Every row must have the same number of values.
    pub fn read<R: std::io::Read>(&self, source: R) -> Result<DMatrix<f64>, CorrectionError> {
        let mut reader = self.reader(source);
        let mut width = None;
        let mut values = Vec::new();
        let mut rows = 0;
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let row = record
                .iter()
                .filter(|field| !field.is_empty())
                .map(|field| {
                    field.parse::<f64>().map_err(|e| {
                        CorrectionError::ParseError(format!(
                            "line {}: '{}' is not a number ({})",
                            line, field, e
                        ))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            if row.is_empty() {
                continue;
            }
            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(CorrectionError::ParseError(format!(
                        "line {}: {} values, expected {}",
                        line,
                        row.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }
            values.extend(row);
            rows += 1;
        }
        Ok(DMatrix::from_row_slice(rows, width.unwrap_or(0), &values))
    }

    /// Writes one record per sample, values in shortest round-trip form.
    pub fn write<W: std::io::Write>(
        &self,
        data: &DMatrix<f64>,
        sink: W,
    ) -> Result<(), CorrectionError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_writer(sink);
        for row in data.row_iter() {
            writer.write_record(row.iter().map(|v| format!("{:?}", v)))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn parse(&self, contents: &str) -> Result<DMatrix<f64>, CorrectionError> {
        self.read(contents.as_bytes())
    }
}

#[cfg(feature = "allow_filesystem")]
impl DataStore for TextDataStore {
    fn retrieve(&self, file: &FilePath) -> Result<DMatrix<f64>, CorrectionError> {
        self.read(std::fs::File::open(file)?)
    }

    fn store(&self, data: &DMatrix<f64>, file: &FilePath) -> Result<(), CorrectionError> {
        self.write(data, std::fs::File::create(file)?)
    }
}
