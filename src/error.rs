use thiserror::Error;

/// Error returned by the `stem` binary: a message plus the process exit code.
///
/// Exit codes:
/// - 2: usage, configuration or input-file problems
/// - 3: no usable data after ingest
/// - 4: terminal / IO failures at runtime
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

/// Structural errors of the reconstruction configuration.
///
/// These are fatal for the whole run. Per-row problems are never reported
/// through this type; see `reconstruct::DataIssue`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconstructError {
    #[error(
        "Invalid year range: year_min={year_min}, year_max={year_max}, anchor_year={anchor_year} \
         (need year_min <= anchor_year <= year_max, at most 1000 years)"
    )]
    InvalidRange {
        year_min: i32,
        year_max: i32,
        anchor_year: i32,
    },

    #[error("Invalid growth rate {0}: must be finite and > 0")]
    InvalidGrowthRate(f64),
}

impl From<ReconstructError> for AppError {
    fn from(err: ReconstructError) -> Self {
        AppError::new(2, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstruct_error_maps_to_usage_exit_code() {
        let err: AppError = ReconstructError::InvalidGrowthRate(-1.0).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("-1"));
    }
}
