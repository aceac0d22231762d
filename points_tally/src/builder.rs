pub use crate::config::*;

/// A builder for collecting ballots before tallying them.
///
/// ```
/// pub use points_tally::builder::Builder;
/// pub use points_tally::ScoringSchedule;
///
/// let mut builder = Builder::new(&ScoringSchedule::new(&[12, 10, 8]));
///
/// builder.add_ballot_simple(&["Sweden".to_string(), "".to_string(), "Italy".to_string()]);
/// builder.add_ballot_simple(&["Italy".to_string()]);
///
/// let tally = builder.tally();
/// assert_eq!(tally.total_ballots(), 2);
/// assert_eq!(tally.points_for("Italy"), Some(20));
/// ```
pub struct Builder {
    pub(crate) _schedule: ScoringSchedule,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(schedule: &ScoringSchedule) -> Builder {
        Builder {
            _schedule: schedule.clone(),
            _ballots: Vec::new(),
        }
    }

    /// Adds a ballot given as a list of choices, most preferred first.
    ///
    /// Choices do not need to be unique or non-empty.
    pub fn add_ballot_simple(&mut self, choices: &[String]) {
        self.add_ballot(Ballot {
            entries: choices.to_vec(),
        })
    }

    pub fn add_ballot(&mut self, ballot: Ballot) {
        self._ballots.push(ballot);
    }

    /// The number of ballots added so far.
    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    pub fn tally(&self) -> CumulativeTally {
        crate::run_tally(&self._ballots, &self._schedule)
    }
}
