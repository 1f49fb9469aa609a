//! Error types.
//!
//! Two layers:
//!
//! - [`SeriesError`]: the core computation failures (index construction and
//!   deflation). These are surfaced verbatim; the core never catches and
//!   suppresses them.
//! - [`AppError`]: the boundary error carried up to `main`, with a process
//!   exit code: 2 = input/file problems, 3 = input-domain violations,
//!   4 = runtime/terminal failures.

/// Failures of the index builder and the deflator.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The same year appears twice in the inflation input.
    DuplicateYear { year: i32 },
    /// The designated base year is absent from the inflation input.
    MissingBaseYear { base_year: i32 },
    /// An inflation rate at or below -100%, which would produce a
    /// non-positive price index.
    DegenerateRate { year: i32, rate: f64 },
    /// No years overlap between the wage data and the price index.
    EmptyJoin,
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::DuplicateYear { year } => {
                write!(f, "Duplicate year {year} in the inflation input.")
            }
            SeriesError::MissingBaseYear { base_year } => {
                write!(f, "Base year {base_year} is not present in the inflation input.")
            }
            SeriesError::DegenerateRate { year, rate } => {
                write!(
                    f,
                    "Inflation rate {rate}% for year {year} is out of domain (must be > -100%)."
                )
            }
            SeriesError::EmptyJoin => {
                write!(f, "No overlapping years between the wage data and the price index.")
            }
        }
    }
}

impl std::error::Error for SeriesError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
