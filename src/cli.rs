//! Command-line interface.

use clap::{Parser, Subcommand, ValueEnum};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    #[default]
    Pretty,
    Json,
}

/// Which programme search page to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Bachelor,
    Master,
}

impl Level {
    /// Directory name for this level under the data dir.
    pub fn dir_name(self) -> &'static str {
        match self {
            Level::Bachelor => "bp",
            Level::Master => "mp",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "courseval", about = "Harvest course-evaluation reports into CSV tables")]
pub struct Args {
    /// Log output format.
    #[arg(long, value_enum, default_value = "pretty")]
    pub tracing: TracingFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the search pages and write the form field map (map.csv).
    Map,
    /// Drive the search form for the given programme/year ids and save the
    /// result pages.
    Search {
        #[arg(long, value_enum, default_value = "bachelor")]
        level: Level,
        /// Programme search id (repeatable; tag=sid pairs come from map.csv).
        #[arg(long = "programme", required = true)]
        programmes: Vec<String>,
        /// Academic-year search id (repeatable).
        #[arg(long = "year", required = true)]
        years: Vec<String>,
    },
    /// Parse saved search pages into report_map.csv.
    ParseSearch,
    /// Download every report listed in report_map.csv.
    Reports,
    /// Parse saved reports into report.csv.
    ParseReports,
    /// Full pipeline: map, search, parse-search, reports, parse-reports.
    Run {
        #[arg(long, value_enum, default_value = "bachelor")]
        level: Level,
        #[arg(long = "programme", required = true)]
        programmes: Vec<String>,
        #[arg(long = "year", required = true)]
        years: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_parse_search() {
        let args = Args::parse_from([
            "courseval", "search", "--level", "master", "--programme", "275", "--programme",
            "147", "--year", "49",
        ]);
        match args.command {
            Command::Search { level, programmes, years } => {
                assert_eq!(level, Level::Master);
                assert_eq!(programmes, vec!["275", "147"]);
                assert_eq!(years, vec!["49"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_args_search_requires_programme() {
        assert!(Args::try_parse_from(["courseval", "search", "--year", "49"]).is_err());
    }

    #[test]
    fn test_level_dir_names() {
        assert_eq!(Level::Bachelor.dir_name(), "bp");
        assert_eq!(Level::Master.dir_name(), "mp");
    }
}
