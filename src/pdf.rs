use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

/// Full text of the question bank source.
///
/// `.pdf` files go through `pdf-extract`; anything else is assumed to be
/// text that was already extracted (e.g. by the `extract` command).
pub fn load_source_text(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("source file not found: {}", path.display());
    }

    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        pdf_extract::extract_text_from_mem(&bytes)
            .with_context(|| format!("extracting text from {}", path.display()))?
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };

    if text.trim().is_empty() {
        warn!(path = %path.display(), "source produced no text");
    } else {
        debug!(path = %path.display(), chars = text.len(), "loaded source text");
    }
    Ok(text)
}
