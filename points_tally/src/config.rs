// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The points of the classic Eurovision schedule, from the first rank down.
pub const DEFAULT_POINTS: [u32; 10] = [12, 10, 8, 7, 6, 5, 4, 3, 2, 1];

/// A positional scoring schedule.
///
/// The entry at index `i` is the number of points given to the choice ranked
/// at position `i + 1` on a ballot. Choices ranked beyond the length of the
/// schedule do not score. An empty schedule is allowed: ballots still count,
/// but nobody receives points.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct ScoringSchedule {
    points: Vec<u32>,
}

impl ScoringSchedule {
    pub fn new(points: &[u32]) -> ScoringSchedule {
        ScoringSchedule {
            points: points.to_vec(),
        }
    }

    /// The number of ranks that receive points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[u32] {
        &self.points
    }

    /// The points for a zero-based rank, if this rank scores at all.
    pub fn points_at(&self, rank: usize) -> Option<u32> {
        self.points.get(rank).cloned()
    }
}

impl Default for ScoringSchedule {
    fn default() -> Self {
        ScoringSchedule::new(&DEFAULT_POINTS)
    }
}

/// Parses a comma-separated list of points, such as `12, 10, 8`.
///
/// Whitespace around each value is ignored. Every value must be a
/// non-negative integer, so an empty string or a trailing comma is rejected.
impl FromStr for ScoringSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut points: Vec<u32> = Vec::new();
        for (idx, elt) in s.split(',').enumerate() {
            let value = elt.trim();
            let p = value
                .parse::<u32>()
                .map_err(|_| ScheduleError::InvalidPoints {
                    position: idx + 1,
                    value: value.to_string(),
                })?;
            points.push(p);
        }
        Ok(ScoringSchedule { points })
    }
}

impl Display for ScoringSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.points.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// One submitted ballot: the choices of a voter, most preferred first.
///
/// Blank choices (empty, or only whitespace) keep their rank but never score.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    pub entries: Vec<String>,
}

// ******** Output data structures *********

/// The cumulative points of all the ballots of a pass.
///
/// Entries are kept in the order in which they were first seen.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CumulativeTally {
    pub(crate) points: Vec<(String, u64)>,
    pub(crate) positions: HashMap<String, usize>,
    pub(crate) total_ballots: u64,
}

/// A line of the ranking, with a 1-based position.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankedEntry {
    pub position: usize,
    pub name: String,
    pub points: u64,
}

/// How much of a ranking to show.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DisplayPolicy {
    /// Maximum number of entries to show.
    pub max_entries: usize,
    /// If false, the display stops at the first entry without points.
    pub show_zero_points: bool,
}

impl DisplayPolicy {
    pub const DEFAULT_POLICY: DisplayPolicy = DisplayPolicy {
        max_entries: 10,
        show_zero_points: false,
    };
}

/// Errors when reading a scoring schedule.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScheduleError {
    /// The value at this (1-based) position is not a non-negative integer.
    InvalidPoints { position: usize, value: String },
}

impl Error for ScheduleError {}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidPoints { position, value } => write!(
                f,
                "invalid points value {:?} at position {}",
                value, position
            ),
        }
    }
}
