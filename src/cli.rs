//! CLI argument parsing module for depscope

use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::analyzer::StabilityFilter;

/// Parse a duration given in seconds
fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Dependency version intelligence for Maven Central
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depscope",
    version,
    about = "Dependency version intelligence and project health analysis"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output, no progress display
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the latest versions of a dependency by stability tier
    Latest {
        /// Dependency coordinate ('groupId:artifactId')
        dependency: String,

        /// Prioritize the latest stable version
        #[arg(long)]
        prefer_stable: bool,
    },

    /// Check whether a specific version exists
    Exists {
        /// Dependency coordinate ('groupId:artifactId[:version]')
        dependency: String,

        /// Version to check, if not part of the coordinate
        version: Option<String>,
    },

    /// Classify a version string into a stability tier
    Classify {
        /// Version string (e.g. '2.17.0-RC1')
        version: String,
    },

    /// Compare two version strings
    Compare {
        /// Current version
        current: String,

        /// Candidate latest version
        latest: String,
    },

    /// Analyze many dependencies concurrently
    Batch {
        /// Dependency coordinates ('groupId:artifactId[:version]'),
        /// also accepted comma-separated
        #[arg(required = true)]
        dependencies: Vec<String>,

        /// Only consider stable versions as update targets
        #[arg(long, conflicts_with = "prefer_stable")]
        stable_only: bool,

        /// Prefer stable targets, falling back to pre-releases
        #[arg(long)]
        prefer_stable: bool,

        /// Maximum concurrent registry requests
        #[arg(long, default_value_t = crate::orchestrator::DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Overall timeout for the whole batch, in seconds
        #[arg(long, value_parser = parse_seconds)]
        timeout: Option<Duration>,
    },

    /// Score overall project health across dependencies
    Health {
        /// Dependency coordinates ('groupId:artifactId[:version]')
        #[arg(required = true)]
        dependencies: Vec<String>,

        /// Include a vulnerability scan (OSV)
        #[arg(long)]
        security: bool,

        /// Include a license scan (POM metadata)
        #[arg(long)]
        licenses: bool,

        /// Maximum concurrent registry requests
        #[arg(long, default_value_t = crate::orchestrator::DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Overall timeout for the whole analysis, in seconds
        #[arg(long, value_parser = parse_seconds)]
        timeout: Option<Duration>,
    },
}

impl Command {
    /// Stability filter implied by the subcommand flags
    pub fn stability_filter(&self) -> StabilityFilter {
        match self {
            Command::Batch {
                stable_only: true, ..
            } => StabilityFilter::StableOnly,
            Command::Batch {
                prefer_stable: true,
                ..
            } => StabilityFilter::PreferStable,
            Command::Health { .. } => StabilityFilter::PreferStable,
            _ => StabilityFilter::All,
        }
    }
}

/// Expand entries that themselves hold comma/newline separated lists
pub fn expand_dependency_args(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| crate::domain::split_coordinate_list(entry))
        .map(str::to_string)
        .collect()
}
