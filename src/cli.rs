//! Command-line interface definitions for the corpus builder.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API token can also come from the environment.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the corpus builder.
///
/// # Examples
///
/// ```sh
/// # Crawl January 2019 into ./data
/// qiita_corpus --auth-token TOKEN --data-dir ./data --start-date 2019-01-01 --end-date 2019-01-31
///
/// # Token from the environment, custom filter profiles
/// QIITA_AUTH_TOKEN=TOKEN qiita_corpus -d ./data -s 2019-01-01 -e 2019-01-02 -c corpus.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Qiita API access token
    #[arg(short, long, env = "QIITA_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: String,

    /// Directory for the corpus files (created if absent)
    #[arg(short, long)]
    pub data_dir: PathBuf,

    /// First creation date to crawl, inclusive (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: NaiveDate,

    /// Last creation date to crawl, inclusive (YYYY-MM-DD)
    #[arg(short, long)]
    pub end_date: NaiveDate,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,
}
