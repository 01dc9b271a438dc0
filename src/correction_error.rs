//! Error handling for path correction and the file layers around it

use std::io;

/// Unified error to report malformed paths, layouts and parameter files.
#[derive(Debug)]
pub enum CorrectionError {
    /// The layout does not fit the path (gate count exceeds encoded gates,
    /// column outside the row, invalid parameter value).
    InvalidConfiguration(String),
    /// Two consecutive samples have zero or negative time difference.
    DegenerateTimestep { index: usize, dt: f64 },
    /// Correction needs at least two samples.
    EmptyPath { found: usize },
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
}

impl std::fmt::Display for CorrectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            CorrectionError::InvalidConfiguration(ref msg) =>
                write!(f, "Invalid Configuration: {}", msg),
            CorrectionError::DegenerateTimestep { index, dt } =>
                write!(f, "Degenerate Timestep: dt = {} between samples {} and {}", dt, index, index + 1),
            CorrectionError::EmptyPath { found } =>
                write!(f, "Empty Path: at least 2 samples required, found {}", found),
            CorrectionError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            CorrectionError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            CorrectionError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
        }
    }
}

impl std::error::Error for CorrectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorrectionError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CorrectionError {
    fn from(err: io::Error) -> Self {
        CorrectionError::IoError(err)
    }
}

#[cfg(feature = "allow_filesystem")]
impl From<csv::Error> for CorrectionError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            CorrectionError::IoError(err.into())
        } else {
            CorrectionError::ParseError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_degenerate_timestep() {
        let err = CorrectionError::DegenerateTimestep { index: 4, dt: 0.0 };
        assert_eq!(format!("{}", err), "Degenerate Timestep: dt = 0 between samples 4 and 5");
    }

    #[test]
    fn test_io_error_is_source() {
        use std::error::Error;
        let err: CorrectionError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(CorrectionError::EmptyPath { found: 1 }.source().is_none());
    }

    #[cfg(feature = "allow_filesystem")]
    #[test]
    fn test_csv_errors() {
        let from_io: CorrectionError = csv::Error::from(io::Error::new(io::ErrorKind::NotFound, "gone")).into();
        assert!(matches!(from_io, CorrectionError::IoError(_)));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("1,2\n3\n".as_bytes());
        let err = reader.records().find_map(Result::err).expect("unequal lengths");
        assert!(matches!(CorrectionError::from(err), CorrectionError::ParseError(_)));
    }
}
