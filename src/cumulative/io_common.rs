use std::fs;
use std::path::Path;

/// The file name of a path, for the console report.
pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// True if the path is named like a ballot file (`*.json`).
pub fn is_ballot_file_name(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

/// True if `path` is the same file as `canonical_output`, which must already
/// be canonicalized. Nothing matches an output that does not exist yet.
pub fn is_output_file(path: &Path, canonical_output: Option<&Path>) -> bool {
    match canonical_output {
        Some(output) => fs::canonicalize(path)
            .map(|p| p == output)
            .unwrap_or(false),
        None => false,
    }
}
