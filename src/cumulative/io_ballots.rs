// Reading the ballot files of the votes directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::cumulative::io_common::{is_ballot_file_name, is_output_file};
use crate::cumulative::*;

/// A ballot file, as written by the voting page. Other fields are ignored.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct BallotFile {
    votes: Vec<Option<String>>,
}

/// Lists the ballot files of a directory, sorted by name.
///
/// The output file is never a ballot, even if it lives in the directory.
/// A missing directory (or a path that is not a directory) has no ballots.
/// Entries that cannot be inspected are reported and skipped.
pub fn list_ballot_files(votes_directory: &Path, output: &Path) -> TallyResult<Vec<PathBuf>> {
    if !votes_directory.is_dir() {
        debug!(
            "list_ballot_files: {:?} is not a directory, no ballots",
            votes_directory
        );
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(votes_directory).context(ListingDirectorySnafu {
        path: votes_directory.display().to_string(),
    })?;
    let canonical_output = fs::canonicalize(output).ok();

    let mut res: Vec<PathBuf> = Vec::new();
    for entry_r in entries {
        let entry = match entry_r {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error listing {}: {}", votes_directory.display(), e);
                continue;
            }
        };
        let p = entry.path();
        if is_ballot_file_name(&p)
            && p.is_file()
            && !is_output_file(&p, canonical_output.as_deref())
        {
            res.push(p);
        }
    }
    res.sort();
    Ok(res)
}

pub fn read_ballot(path: &Path) -> TallyResult<Ballot> {
    let p = path.display().to_string();
    let contents = fs::read_to_string(path).context(OpeningBallotSnafu { path: p.clone() })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingBallotSnafu { path: p.clone() })?;
    ensure!(js.is_object(), NotABallotSnafu { path: p });
    let bf: BallotFile = serde_json::from_value(js).context(ParsingBallotSnafu { path: p })?;
    debug!("read_ballot: {:?}: {:?}", path, bf.votes);
    Ok(Ballot {
        entries: bf
            .votes
            .into_iter()
            .map(|choice| choice.unwrap_or_default())
            .collect(),
    })
}
