use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ini::{Ini, Properties};
use log::{info, warn};
use points_tally::{DisplayPolicy, ScheduleError, ScoringSchedule};
use snafu::{prelude::*, Snafu};

/// The configuration file read when none is given on the command line.
pub const DEFAULT_SETTINGS_FILE: &str = "calculate_cumulative.ini";

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("cannot read {path}: {source}"))]
    ReadingSettings {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    ParsingIni { source: ini::ParseError },
    #[snafu(display("invalid value {value:?} for {key} in section [{section}]"))]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
    #[snafu(display("invalid points_system {value:?}: {source}"))]
    InvalidPoints {
        value: String,
        source: ScheduleError,
    },
}

/// The `[output]` section: how the console report looks.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OutputSettings {
    pub show_header: bool,
    pub show_separator: bool,
    pub separator_char: String,
    pub separator_length: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            show_header: true,
            show_separator: true,
            separator_char: "-".to_string(),
            separator_length: 50,
        }
    }
}

/// All the settings of a run. Built once at startup, then only read.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    /// Seconds to wait between two passes in continuous mode.
    pub update_interval: u64,
    pub votes_directory: PathBuf,
    pub cumulative_file: PathBuf,
    pub points_system: ScoringSchedule,
    pub enable_logging: bool,
    pub show_timestamps: bool,
    pub show_vote_details: bool,
    pub max_countries_display: usize,
    pub show_zero_points: bool,
    pub output: OutputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            update_interval: 15,
            votes_directory: PathBuf::from("."),
            cumulative_file: PathBuf::from("cumulativevotes.json"),
            points_system: ScoringSchedule::default(),
            enable_logging: true,
            show_timestamps: true,
            show_vote_details: true,
            max_countries_display: 10,
            show_zero_points: false,
            output: OutputSettings::default(),
        }
    }
}

impl Settings {
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval)
    }

    pub fn display_policy(&self) -> DisplayPolicy {
        DisplayPolicy {
            max_entries: self.max_countries_display,
            show_zero_points: self.show_zero_points,
        }
    }
}

/// Where the settings of a run come from.
#[derive(Debug)]
pub enum SettingsOrigin {
    /// No configuration file at this path.
    Defaults(PathBuf),
    File(PathBuf),
    /// The file exists but could not be used.
    Fallback(PathBuf, SettingsError),
}

impl SettingsOrigin {
    /// Reports the origin. Called once the logger is set up.
    pub fn log(&self) {
        match self {
            SettingsOrigin::Defaults(_) => {
                info!("No config file found, using default configuration");
            }
            SettingsOrigin::File(path) => {
                info!("Configuration loaded from {}", path.display());
            }
            SettingsOrigin::Fallback(path, e) => {
                warn!("Error loading config file {}: {}", path.display(), e);
                warn!("Using default configuration");
            }
        }
    }
}

/// Reads the settings, falling back to the defaults for the whole file if
/// anything in it is invalid.
pub fn load_settings(path: &Path) -> (Settings, SettingsOrigin) {
    if !path.exists() {
        return (
            Settings::default(),
            SettingsOrigin::Defaults(path.to_path_buf()),
        );
    }
    let res = fs::read_to_string(path)
        .context(ReadingSettingsSnafu {
            path: path.display().to_string(),
        })
        .and_then(|contents| parse_settings(&contents));
    match res {
        Ok(settings) => (settings, SettingsOrigin::File(path.to_path_buf())),
        Err(e) => (
            Settings::default(),
            SettingsOrigin::Fallback(path.to_path_buf(), e),
        ),
    }
}

pub fn parse_settings(contents: &str) -> Result<Settings, SettingsError> {
    let conf = Ini::load_from_str(contents).context(ParsingIniSnafu {})?;
    let mut settings = Settings::default();

    if let Some(props) = conf.section(Some("settings")) {
        let section = "settings";
        settings.update_interval =
            read_value(props, section, "update_interval", settings.update_interval)?;
        if let Some(dir) = props.get("votes_directory") {
            settings.votes_directory = PathBuf::from(dir.trim());
        }
        if let Some(file) = props.get("cumulative_file") {
            settings.cumulative_file = PathBuf::from(file.trim());
        }
        settings.enable_logging =
            read_bool(props, section, "enable_logging", settings.enable_logging)?;
        settings.show_timestamps =
            read_bool(props, section, "show_timestamps", settings.show_timestamps)?;
        settings.show_vote_details =
            read_bool(props, section, "show_vote_details", settings.show_vote_details)?;
        settings.max_countries_display = read_value(
            props,
            section,
            "max_countries_display",
            settings.max_countries_display,
        )?;
        settings.show_zero_points =
            read_bool(props, section, "show_zero_points", settings.show_zero_points)?;
        if let Some(value) = props.get("points_system") {
            settings.points_system = value
                .parse::<ScoringSchedule>()
                .context(InvalidPointsSnafu { value })?;
        }
    }

    if let Some(props) = conf.section(Some("output")) {
        let section = "output";
        let output = &mut settings.output;
        output.show_header = read_bool(props, section, "show_header", output.show_header)?;
        output.show_separator =
            read_bool(props, section, "show_separator", output.show_separator)?;
        if let Some(c) = props.get("separator_char") {
            output.separator_char = c.trim().to_string();
        }
        output.separator_length =
            read_value(props, section, "separator_length", output.separator_length)?;
    }

    Ok(settings)
}

fn read_value<T: FromStr>(
    props: &Properties,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, SettingsError> {
    match props.get(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .ok()
            .context(InvalidValueSnafu {
                section,
                key,
                value,
            }),
    }
}

// Accepts 1/yes/true/on and 0/no/false/off, in any case.
fn read_bool(
    props: &Properties,
    section: &str,
    key: &str,
    default: bool,
) -> Result<bool, SettingsError> {
    match props.get(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(true),
            "0" | "no" | "false" | "off" => Ok(false),
            _ => InvalidValueSnafu {
                section,
                key,
                value,
            }
            .fail(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.points_system.points(), &[12, 10, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(settings.update_interval(), Duration::from_secs(15));
        assert_eq!(settings.cumulative_file, PathBuf::from("cumulativevotes.json"));
    }

    #[test]
    fn reads_both_sections() {
        let contents = "
[settings]
update_interval = 30
votes_directory = votes
cumulative_file = total.json
points_system = 3, 2, 1
enable_logging = no
show_timestamps = off
show_vote_details = 0
max_countries_display = 5
show_zero_points = Yes

[output]
show_header = false
show_separator = true
separator_char = *
separator_length = 20
";
        let settings = parse_settings(contents).unwrap();
        assert_eq!(settings.update_interval, 30);
        assert_eq!(settings.votes_directory, PathBuf::from("votes"));
        assert_eq!(settings.cumulative_file, PathBuf::from("total.json"));
        assert_eq!(settings.points_system, ScoringSchedule::new(&[3, 2, 1]));
        assert!(!settings.enable_logging);
        assert!(!settings.show_timestamps);
        assert!(!settings.show_vote_details);
        assert_eq!(settings.max_countries_display, 5);
        assert!(settings.show_zero_points);
        assert!(!settings.output.show_header);
        assert_eq!(settings.output.separator_char, "*");
        assert_eq!(settings.output.separator_length, 20);
        assert_eq!(
            settings.display_policy(),
            DisplayPolicy {
                max_entries: 5,
                show_zero_points: true
            }
        );
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let settings = parse_settings("[settings]\nupdate_interval = 1\n").unwrap();
        assert_eq!(settings.update_interval, 1);
        assert_eq!(settings.max_countries_display, 10);
        assert_eq!(settings.output, OutputSettings::default());
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            parse_settings("[settings]\nupdate_interval = soon\n"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_settings("[settings]\nupdate_interval = -5\n"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_settings("[output]\nshow_header = maybe\n"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_settings("[settings]\npoints_system = 12,ten\n"),
            Err(SettingsError::InvalidPoints { .. })
        ));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, origin) = load_settings(&dir.path().join("nothing.ini"));
        assert_eq!(settings, Settings::default());
        assert!(matches!(origin, SettingsOrigin::Defaults(_)));
    }

    #[test]
    fn load_invalid_file_falls_back_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calculate_cumulative.ini");
        let mut f = fs::File::create(&path).unwrap();
        // The first value is valid, the second is not: nothing is kept.
        writeln!(f, "[settings]\nupdate_interval = 2\nmax_countries_display = many").unwrap();
        drop(f);
        let (settings, origin) = load_settings(&path);
        assert_eq!(settings, Settings::default());
        assert!(matches!(origin, SettingsOrigin::Fallback(_, _)));
    }

    #[test]
    fn load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calculate_cumulative.ini");
        fs::write(&path, "[settings]\npoints_system = 1\n").unwrap();
        let (settings, origin) = load_settings(&path);
        assert_eq!(settings.points_system, ScoringSchedule::new(&[1]));
        assert!(matches!(origin, SettingsOrigin::File(_)));
    }
}
