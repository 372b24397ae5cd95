//! CLI argument definitions using clap
//!
//! Commands:
//! - roster serve --config <path> --port <port>
//! - roster search --config <path> [filters] [paging]
//! - roster stats --config <path> [filters]
//! - roster bulk-update --config <path> [filters] [assignments]
//! - roster bulk-delete --config <path> [filters]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::TeamId;
use crate::search::SearchFilter;
use crate::store::Assignment;

/// roster - member search over a seeded member/team dataset
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the dataset and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one paged search and exit
    Search {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        /// Defaults to the configured page size
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// e.g. `age.desc,username.asc.nullsfirst`
        #[arg(long)]
        sort: Option<String>,
    },

    /// Print age statistics and per-team averages
    Stats {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Update every matching member, then print the refreshed rows
    BulkUpdate {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        assignments: AssignmentArgs,
    },

    /// Delete every matching member
    BulkDelete {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Search criteria shared by every data command
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub team_name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub age_goe: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub age_loe: Option<i32>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> SearchFilter {
        SearchFilter {
            username_eq: self.username.clone(),
            team_name_eq: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }
}

/// Field changes for `bulk-update`, applied in the order listed here
#[derive(Args, Debug, Clone, Default)]
pub struct AssignmentArgs {
    #[arg(long, conflicts_with = "clear_username")]
    pub set_username: Option<String>,

    #[arg(long)]
    pub clear_username: bool,

    #[arg(long, allow_negative_numbers = true)]
    pub set_age: Option<i32>,

    /// Negative values subtract
    #[arg(long, allow_negative_numbers = true)]
    pub add_age: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub multiply_age: Option<i32>,

    #[arg(long, conflicts_with = "clear_team")]
    pub set_team: Option<u64>,

    #[arg(long)]
    pub clear_team: bool,
}

impl AssignmentArgs {
    pub fn to_assignments(&self) -> Vec<Assignment> {
        let mut assignments = Vec::new();
        if let Some(username) = &self.set_username {
            assignments.push(Assignment::SetUsername(Some(username.clone())));
        }
        if self.clear_username {
            assignments.push(Assignment::SetUsername(None));
        }
        if let Some(age) = self.set_age {
            assignments.push(Assignment::SetAge(age));
        }
        if let Some(delta) = self.add_age {
            assignments.push(Assignment::AddAge(delta));
        }
        if let Some(factor) = self.multiply_age {
            assignments.push(Assignment::MultiplyAge(factor));
        }
        if let Some(team) = self.set_team {
            assignments.push(Assignment::SetTeam(Some(TeamId(team))));
        }
        if self.clear_team {
            assignments.push(Assignment::SetTeam(None));
        }
        assignments
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "roster",
            "search",
            "--team-name",
            "teamB",
            "--age-goe",
            "31",
            "--limit",
            "5",
            "--sort",
            "age.desc",
        ])
        .unwrap();

        match cli.command {
            Command::Search {
                filter,
                offset,
                limit,
                sort,
                ..
            } => {
                assert_eq!(
                    filter.to_filter(),
                    SearchFilter::new().team_name("teamB").age_goe(31)
                );
                assert_eq!(offset, 0);
                assert_eq!(limit, Some(5));
                assert_eq!(sort.as_deref(), Some("age.desc"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_assignment_order() {
        let cli = Cli::try_parse_from([
            "roster",
            "bulk-update",
            "--age-loe",
            "20",
            "--add-age",
            "-1",
            "--clear-username",
        ])
        .unwrap();

        match cli.command {
            Command::BulkUpdate { assignments, .. } => {
                assert_eq!(
                    assignments.to_assignments(),
                    vec![Assignment::SetUsername(None), Assignment::AddAge(-1)]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_conflicting_team_flags() {
        let result = Cli::try_parse_from([
            "roster",
            "bulk-update",
            "--set-team",
            "1",
            "--clear-team",
        ]);
        assert!(result.is_err());
    }
}
