//! Output generation for the finished corpora.
//!
//! # Submodules
//!
//! - [`json`]: Writes the bag-of-words, text and target corpora as JSON files
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── bow.json      # [["見る", "rust", ...], ...]
//! ├── text.json     # [["これ", "は", ...], ...]
//! └── target.json   # [["python", "nlp"], ...]
//! ```
//!
//! Index `i` of every file describes the same article.

pub mod json;
