//! JSON corpus files.
//!
//! Each corpus is written as a JSON array of arrays of strings:
//! ```text
//! data_dir/
//! ├── bow.json
//! ├── text.json
//! └── target.json
//! ```
//!
//! All three documents are serialized and staged under temporary names
//! first. They are renamed into place only once every staged write has
//! succeeded, so a failed write leaves no corpus file behind.

use crate::error::Result;
use crate::pipeline::Corpora;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

pub const BOW_FILE: &str = "bow.json";
pub const TEXT_FILE: &str = "text.json";
pub const TARGET_FILE: &str = "target.json";

fn staging_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!(".{name}.tmp"))
}

/// Write the three corpora under `data_dir`.
///
/// # Returns
///
/// The paths written, in `bow`, `text`, `target` order.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display(), documents = corpora.len()))]
pub async fn write_corpora(corpora: &Corpora, data_dir: &Path) -> Result<Vec<PathBuf>> {
    let serialized = [
        (BOW_FILE, serde_json::to_string(&corpora.bow)?),
        (TEXT_FILE, serde_json::to_string(&corpora.text)?),
        (TARGET_FILE, serde_json::to_string(&corpora.target)?),
    ];

    let mut staged = Vec::with_capacity(serialized.len());
    for (name, json) in serialized {
        let tmp = staging_path(data_dir, name);
        if let Err(e) = fs::write(&tmp, json).await {
            for (_, path) in &staged {
                let _ = fs::remove_file(path).await;
            }
            return Err(e.into());
        }
        staged.push((name, tmp));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (name, tmp) in staged {
        let path = data_dir.join(name);
        fs::rename(&tmp, &path).await?;
        info!(path = %path.display(), "Wrote corpus");
        written.push(path);
    }
    Ok(written)
}

/// Read one corpus file back.
pub async fn read_corpus(path: &Path) -> Result<Vec<Vec<String>>> {
    let raw = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read all three corpora from `data_dir`.
pub async fn read_corpora(data_dir: &Path) -> Result<Corpora> {
    Ok(Corpora {
        bow: read_corpus(&data_dir.join(BOW_FILE)).await?,
        text: read_corpus(&data_dir.join(TEXT_FILE)).await?,
        target: read_corpus(&data_dir.join(TARGET_FILE)).await?,
    })
}
