use std::str::FromStr;
use crate::error::AppError;

/// Named summarization profile controlling output length bounds and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Default,
    Bullets,
    Simple,
}

impl SummaryMode {
    /// Returns the (max_length, min_length) bounds passed to the inference API.
    pub fn length_bounds(self) -> (u32, u32) {
        match self {
            SummaryMode::Default => (150, 50),
            SummaryMode::Bullets => (180, 60),
            SummaryMode::Simple => (100, 40),
        }
    }
}

impl FromStr for SummaryMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SummaryMode::Default),
            "bullets" => Ok(SummaryMode::Bullets),
            "simple" => Ok(SummaryMode::Simple),
            other => Err(AppError::InvalidMode(other.to_string())),
        }
    }
}
