//! # Qiita Corpus
//!
//! Crawls Qiita articles created in a date range and turns them into three
//! index-aligned corpora for topic modeling and tag prediction.
//!
//! ## Usage
//!
//! ```sh
//! qiita_corpus -a <token> -d ./data -s 2019-01-01 -e 2019-02-01
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Crawling**: One date window per day, paged 100 items at a time, one request every 4 s
//! 2. **Quality gate**: Articles without likes are dropped
//! 3. **Normalization**: Each body goes through the bag-of-words and text filter chains
//! 4. **Output**: `bow.json`, `text.json` and `target.json` in the data directory

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;
use qiita_corpus::analysis::Normalizer;
use qiita_corpus::analysis::tokenizer::default_tokenizer;
use qiita_corpus::api::QiitaClient;
use qiita_corpus::config;
use qiita_corpus::crawler::Crawler;
use qiita_corpus::outputs::json;
use qiita_corpus::pipeline;
use qiita_corpus::stopwords::StopwordSet;
use qiita_corpus::utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("qiita_corpus starting up");

    let args = Cli::parse();
    debug!(data_dir = %args.data_dir.display(), %args.start_date, %args.end_date, "Parsed CLI arguments");

    if let Err(e) = run(&args).await {
        error!(error = %e, "Run failed; no corpus files written");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

#[instrument(level = "info", skip_all, fields(start = %args.start_date, end = %args.end_date))]
async fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let config = config::load_config(args.config.as_deref())?;

    // Early check: fail before a long crawl, not after it
    if let Err(e) = ensure_writable_dir(&args.data_dir).await {
        error!(
            path = %args.data_dir.display(),
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let http = Client::new();

    // ---- Crawl ----
    let source = QiitaClient::new(http.clone(), &config.api.base_url, args.auth_token.clone())?;
    let crawler = Crawler::new(source, config.api.per_page, config.api.request_interval());
    let articles = crawler.crawl(args.start_date, args.end_date).await?;

    // ---- Stopwords & normalizers ----
    let stopwords =
        StopwordSet::fetch(&http, &config.stopwords.urls, &config.stopwords.extra).await?;
    let stopwords = Arc::new(stopwords);
    let tokenizer = default_tokenizer()?;
    let bow = Normalizer::new(&config.bag_of_words, tokenizer.clone(), stopwords.clone())?;
    let text = Normalizer::new(&config.text, tokenizer, stopwords)?;
    debug!(bow = ?bow.analyzer(), text = ?text.analyzer(), "Built analyzers");

    // ---- Corpora ----
    let corpora = pipeline::build_corpora(&articles, &bow, &text, config.min_likes)?;
    json::write_corpora(&corpora, &args.data_dir).await?;

    info!(
        crawled = articles.len(),
        documents = corpora.len(),
        "Corpora written"
    );
    Ok(())
}
