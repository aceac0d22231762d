use log::{debug, error, info, warn};

use points_tally::builder::Builder;
use points_tally::*;
use snafu::{prelude::*, Snafu};

use std::future::Future;
use std::path::Path;

use futures::FutureExt;

pub mod config_reader;
mod io_ballots;
mod io_common;
mod io_tally;
mod report;

use crate::cumulative::config_reader::Settings;
use crate::cumulative::io_ballots::{list_ballot_files, read_ballot};
use crate::cumulative::io_common::simplify_file_name;
use crate::cumulative::io_tally::{check_tally, tally_to_json, write_tally};

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error listing the votes directory {path}: {source}"))]
    ListingDirectory {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening ballot file {path}: {source}"))]
    OpeningBallot {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing ballot file {path}: {source}"))]
    ParsingBallot {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Ballot file {path} does not contain a JSON object"))]
    NotABallot { path: String },
    #[snafu(display("Error serializing the tally: {source}"))]
    SerializingTally { source: serde_json::Error },
    #[snafu(display("Cannot write a tally to {path}: not a file name"))]
    MissingFileName { path: String },
    #[snafu(display("Error writing tally file {path}: {source}"))]
    WritingTally {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening reference tally {path}: {source}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing reference tally {path}: {source}"))]
    ParsingReference {
        source: serde_json::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

/// Computes the tally of all the ballot files of a directory, and writes it
/// to the cumulative file.
///
/// Arguments:
/// * `votes_directory` the directory with the ballot files. A missing
/// directory is an election without ballots.
/// * `cumulative_file` where the tally is written. If it lives in the votes
/// directory, it is not read as a ballot.
/// * `schedule` the points given to each rank
/// * `show_vote_details` logs each ballot file that was counted
///
/// Files that cannot be read as ballots are reported and skipped. Only
/// failing to list the directory or to write the tally is an error.
pub fn aggregate(
    votes_directory: &Path,
    cumulative_file: &Path,
    schedule: &ScoringSchedule,
    show_vote_details: bool,
) -> TallyResult<CumulativeTally> {
    let files = list_ballot_files(votes_directory, cumulative_file)?;
    debug!("aggregate: {} candidate ballot files", files.len());

    let mut builder = Builder::new(schedule);
    for path in files.iter() {
        match read_ballot(path) {
            Ok(ballot) => {
                builder.add_ballot(ballot);
                if show_vote_details {
                    info!("Processed vote from: {}", simplify_file_name(path));
                }
            }
            Err(e) => {
                warn!("Error processing {}: {}", path.display(), e);
            }
        }
    }

    let tally = builder.tally();
    write_tally(cumulative_file, &tally)?;
    Ok(tally)
}

/// One complete pass: scan, sum, persist, then report on the console.
pub fn run_pass(settings: &Settings) -> TallyResult<CumulativeTally> {
    let tally = aggregate(
        &settings.votes_directory,
        &settings.cumulative_file,
        &settings.points_system,
        settings.show_vote_details,
    )?;
    report::log_pass(settings, &tally);
    Ok(tally)
}

/// Runs a single pass. If a reference tally is given, the written tally must
/// match it.
pub fn run_once(
    settings: &Settings,
    check_summary_path: Option<String>,
) -> TallyResult<CumulativeTally> {
    let tally = run_pass(settings)?;
    if let Some(summary_p) = check_summary_path {
        check_tally(&tally_to_json(&tally), summary_p)?;
    }
    Ok(tally)
}

/// Runs passes until `shutdown` completes, waiting for the update interval
/// after each pass.
///
/// A pass is never interrupted: the shutdown is only observed before a pass
/// starts and while waiting. Returns the number of completed passes.
pub async fn run_continuous<F>(settings: &Settings, shutdown: F) -> TallyResult<u64>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    // Polling once installs the listener before the first pass.
    let mut stopped = shutdown.as_mut().now_or_never().is_some();

    report::log_banner(settings);
    let mut passes: u64 = 0;
    while !stopped {
        if let Err(e) = run_pass(settings) {
            error!("Error in continuous calculation: {}", e);
            return Err(e);
        }
        passes += 1;

        info!(
            "Waiting {} seconds for next update...",
            settings.update_interval
        );
        report::log_separator(settings);

        tokio::select! {
            biased;
            _ = shutdown.as_mut() => {
                stopped = true;
            }
            _ = tokio::time::sleep(settings.update_interval()) => {
                stopped = shutdown.as_mut().now_or_never().is_some();
            }
        }
    }

    info!("Calculator stopped by user");
    info!("Final cumulative results saved.");
    Ok(passes)
}
