// Writing the cumulative file, and comparing it with a reference.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use snafu::prelude::*;
use text_diff::print_diff;

use crate::cumulative::*;

/// The JSON form of a tally. Entities are sorted by name.
pub fn tally_to_json(tally: &CumulativeTally) -> JSValue {
    let mut points: JSMap<String, JSValue> = JSMap::new();
    for (name, count) in tally.points() {
        points.insert(name.clone(), json!(count));
    }
    json!({
        "countryPoints": points,
        "totalVotes": tally.total_ballots()
    })
}

/// Replaces the content of `path` with the tally.
///
/// The tally is first written next to the destination, then renamed over
/// it: readers see either the previous tally or the new one.
pub fn write_tally(path: &Path, tally: &CumulativeTally) -> TallyResult<()> {
    let pretty_js = serde_json::to_string_pretty(&tally_to_json(tally))
        .context(SerializingTallySnafu {})?;
    let tmp_path = temporary_path(path)?;
    debug!("write_tally: writing {:?} then renaming to {:?}", tmp_path, path);

    fs::write(&tmp_path, pretty_js.as_bytes()).context(WritingTallySnafu {
        path: tmp_path.display().to_string(),
    })?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).context(WritingTallySnafu {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

fn temporary_path(path: &Path) -> TallyResult<PathBuf> {
    let name = path.file_name().context(MissingFileNameSnafu {
        path: path.display().to_string(),
    })?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

pub fn read_tally(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningReferenceSnafu { path })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingReferenceSnafu { path })?;
    Ok(js)
}

/// Checks that a tally matches the reference tally stored at `reference_path`.
///
/// The comparison is on the JSON values, so key order and formatting do not
/// matter. Differences are printed as a line diff.
pub fn check_tally(tally_js: &JSValue, reference_path: String) -> TallyResult<()> {
    let reference = read_tally(reference_path.as_str())?;
    info!("reference tally: {:?}", reference);
    if reference != *tally_js {
        let pretty_js_ref =
            serde_json::to_string_pretty(&reference).context(SerializingTallySnafu {})?;
        let pretty_js_tally =
            serde_json::to_string_pretty(tally_js).context(SerializingTallySnafu {})?;
        warn!("Found differences with the reference tally");
        print_diff(pretty_js_ref.as_str(), pretty_js_tally.as_str(), "\n");
        whatever!("Difference detected between computed tally and reference tally")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(ballots: Vec<Vec<&str>>) -> CumulativeTally {
        let ballots: Vec<Ballot> = ballots
            .iter()
            .map(|b| Ballot {
                entries: b.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        run_tally(&ballots, &ScoringSchedule::new(&[12, 10, 8]))
    }

    #[test]
    fn json_shape() {
        let t = tally(vec![vec!["B", "A"], vec!["A"]]);
        assert_eq!(
            tally_to_json(&t),
            json!({"countryPoints": {"A": 22, "B": 12}, "totalVotes": 2})
        );
    }

    #[test]
    fn written_file_is_pretty_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cumulativevotes.json");
        write_tally(&path, &tally(vec![vec!["Sweden", "Finland"]])).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "{\n  \"countryPoints\": {\n    \"Finland\": 10,\n    \"Sweden\": 12\n  },\n  \"totalVotes\": 1\n}"
        );
        assert!(!dir.path().join(".cumulativevotes.json.tmp").exists());
    }

    #[test]
    fn non_ascii_is_written_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_tally(&path, &tally(vec![vec!["Türkiye"]])).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Türkiye\": 12"));
    }

    #[test]
    fn overwrites_previous_tally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_tally(&path, &tally(vec![vec!["A"], vec!["B"], vec!["C"]])).unwrap();
        write_tally(&path, &CumulativeTally::new()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            serde_json::from_str::<JSValue>(&contents).unwrap(),
            json!({"countryPoints": {}, "totalVotes": 0})
        );
    }

    #[test]
    fn no_file_name_is_an_error() {
        let res = write_tally(Path::new("/"), &CumulativeTally::new());
        assert!(matches!(res, Err(TallyError::MissingFileName { .. })));
    }

    #[test]
    fn missing_reference_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json").display().to_string();
        let res = check_tally(&tally_to_json(&CumulativeTally::new()), missing);
        assert!(matches!(res, Err(TallyError::OpeningReference { .. })));
    }
}
