//! Configuration types for single-progression scans

use crate::error::{Result, SearchError};
use crate::search::progression::Progression;

/// What a scan does each time it finds a prime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Report the prime to the observation sink
    #[default]
    Announce,
    /// Hand the thread back to the scheduler before continuing
    Yield,
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportMode::Announce => write!(f, "announce"),
            ReportMode::Yield => write!(f, "yield"),
        }
    }
}

impl std::str::FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "announce" | "print" | "report" => Ok(ReportMode::Announce),
            "yield" | "cooperative" | "coop" => Ok(ReportMode::Yield),
            _ => Err(format!(
                "Unknown report mode: '{}'. Valid options: announce, yield",
                s
            )),
        }
    }
}

/// Configuration for a scan over one progression
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Scan stops at the first prime strictly greater than this
    pub bound: u64,
    /// Candidates to test
    pub progression: Progression,
    /// Behaviour on each prime found
    pub mode: ReportMode,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bound: 2,
            progression: Progression::default(),
            mode: ReportMode::default(),
        }
    }
}

impl ScanConfig {
    /// Scan every integer above 1 for the first prime past `bound`
    pub fn new(bound: u64) -> Self {
        Self {
            bound,
            ..Default::default()
        }
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_mode(mut self, mode: ReportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check everything that must hold before any candidate is tested
    pub fn validate(&self) -> Result<()> {
        if self.bound < 2 {
            return Err(SearchError::InvalidBound { bound: self.bound });
        }
        self.progression.ensure_fertile()
    }
}
