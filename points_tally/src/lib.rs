mod config;
use log::debug;

pub mod builder;
pub mod manual;

pub use crate::config::*;

/// True if a choice on a ballot does not name anything.
pub fn is_blank(choice: &str) -> bool {
    choice.trim().is_empty()
}

impl CumulativeTally {
    pub fn new() -> CumulativeTally {
        CumulativeTally::default()
    }

    /// Counts one ballot and adds the points of its scored ranks.
    ///
    /// The ballot is counted even if none of its choices scores (all blank,
    /// or an empty schedule).
    pub fn add_ballot(&mut self, ballot: &Ballot, schedule: &ScoringSchedule) {
        self.total_ballots += 1;
        for (rank, (choice, points)) in ballot.entries.iter().zip(schedule.points()).enumerate() {
            if is_blank(choice) {
                debug!("add_ballot: blank choice at rank {}", rank + 1);
                continue;
            }
            self.add_points(choice, *points as u64);
        }
    }

    fn add_points(&mut self, name: &str, points: u64) {
        match self.positions.get(name) {
            Some(idx) => {
                self.points[*idx].1 += points;
            }
            None => {
                self.positions.insert(name.to_string(), self.points.len());
                self.points.push((name.to_string(), points));
            }
        }
    }

    /// The points of each entity, in discovery order.
    pub fn points(&self) -> &[(String, u64)] {
        &self.points
    }

    pub fn points_for(&self, name: &str) -> Option<u64> {
        self.positions.get(name).map(|idx| self.points[*idx].1)
    }

    /// The number of ballots that were counted.
    pub fn total_ballots(&self) -> u64 {
        self.total_ballots
    }

    /// The number of entities that appear in the tally.
    pub fn num_entities(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All the entities, by decreasing number of points.
    ///
    /// Entities with the same number of points stay in discovery order.
    pub fn ranking(&self) -> Vec<RankedEntry> {
        let mut sorted: Vec<&(String, u64)> = self.points.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
            .into_iter()
            .enumerate()
            .map(|(idx, (name, points))| RankedEntry {
                position: idx + 1,
                name: name.clone(),
                points: *points,
            })
            .collect()
    }
}

/// Tallies a collection of ballots with the given schedule.
///
/// Arguments:
/// * `ballots` the ballots to count, in discovery order
/// * `schedule` the points given to each rank
pub fn run_tally(ballots: &[Ballot], schedule: &ScoringSchedule) -> CumulativeTally {
    debug!(
        "run_tally: {:?} ballots, schedule: {}",
        ballots.len(),
        schedule
    );
    let mut tally = CumulativeTally::new();
    for b in ballots.iter() {
        tally.add_ballot(b, schedule);
    }
    debug!("run_tally: tally: {:?}", tally.points());
    tally
}

/// The head of the ranking, as it should be displayed.
///
/// At most `policy.max_entries` entries are returned. Unless zero points are
/// shown, the ranking stops at the first entity without points.
pub fn top_ranking(tally: &CumulativeTally, policy: &DisplayPolicy) -> Vec<RankedEntry> {
    tally
        .ranking()
        .into_iter()
        .take(policy.max_entries)
        .take_while(|e| policy.show_zero_points || e.points > 0)
        .collect()
}
