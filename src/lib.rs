//! Build topic-modeling corpora from Qiita articles.
//!
//! The crate crawls the items API one day at a time under the API's request
//! ceiling, then turns every liked article into three aligned documents:
//! base-form content words, lightly filtered surface tokens, and lowercased
//! tags. The binary wires these modules together; they are exposed here so
//! the crawler and the analysis chain can be reused on their own.

pub mod analysis;
pub mod api;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod stopwords;
pub mod utils;
