use clap::Parser;

/// This program computes the cumulative points of a directory of vote files.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// If passed as an argument, runs a single pass and exits. Otherwise, the cumulative file is
    /// recomputed at every update interval until the program is interrupted (Ctrl+C).
    #[clap(long, takes_value = false)]
    pub once: bool,

    /// (file path, optional) The INI configuration file. If not provided, calculate_cumulative.ini
    /// is read from the current directory, and the defaults are used if it does not exist.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference cumulative file in JSON format. If provided with --once, cumvotes
    /// will check that the written tally matches the reference.
    #[clap(long, value_parser)]
    pub check: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
