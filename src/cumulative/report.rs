// Console report of the passes.

use log::info;

use points_tally::{top_ranking, CumulativeTally, RankedEntry};

use crate::cumulative::config_reader::{OutputSettings, Settings};

/// The separator line, or nothing if separators are turned off.
fn separator_line(output: &OutputSettings) -> Option<String> {
    if output.show_separator {
        Some(output.separator_char.repeat(output.separator_length))
    } else {
        None
    }
}

fn ranking_line(entry: &RankedEntry) -> String {
    format!("  {}. {}: {} points", entry.position, entry.name, entry.points)
}

pub fn log_separator(settings: &Settings) {
    if let Some(line) = separator_line(&settings.output) {
        info!("{}", line);
    }
}

/// The banner printed once when the continuous mode starts.
pub fn log_banner(settings: &Settings) {
    if !settings.output.show_header {
        return;
    }
    info!("Starting cumulative vote calculation...");
    info!("Update interval: {} seconds", settings.update_interval);
    info!("Votes directory: {}", settings.votes_directory.display());
    info!("Output file: {}", settings.cumulative_file.display());
    info!("Press Ctrl+C to stop");
    log_separator(settings);
}

/// The summary of a pass: where the tally went, and the head of the ranking.
fn pass_lines(settings: &Settings, tally: &CumulativeTally) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Cumulative results saved to {}",
            settings.cumulative_file.display()
        ),
        format!("Total votes processed: {}", tally.total_ballots()),
        format!("Countries with points: {}", tally.num_entities()),
    ];
    if !tally.is_empty() {
        let shown = settings.max_countries_display.min(tally.num_entities());
        lines.push(format!("Top {} countries:", shown));
        for entry in top_ranking(tally, &settings.display_policy()).iter() {
            lines.push(ranking_line(entry));
        }
    }
    lines
}

pub fn log_pass(settings: &Settings, tally: &CumulativeTally) {
    for line in pass_lines(settings, tally) {
        info!("{}", line);
    }
}
