//! Knowledge base — the profile and summary documents behind the persona.
//!
//! Both documents are read once at startup. A missing, unreadable or
//! unparsable file yields empty text: the twin just knows less.

use std::path::Path;

use tracing::{debug, info, warn};

/// Immutable profile + summary text, shared read-only for the process lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    /// Text extracted from the profile document (resume / LinkedIn export).
    pub profile: String,
    /// Free-text summary written by the person.
    pub summary: String,
}

impl KnowledgeBase {
    /// Build directly from strings.
    pub fn new(profile: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            summary: summary.into(),
        }
    }

    /// Load both documents. Never fails.
    ///
    /// The profile is run through PDF text extraction when it has a `.pdf`
    /// extension and read as UTF-8 otherwise.
    pub fn load(profile_path: &Path, summary_path: &Path) -> Self {
        let profile = load_profile(profile_path);
        let summary = read_text(summary_path);

        info!(
            profile_chars = profile.chars().count(),
            summary_chars = summary.chars().count(),
            "knowledge base loaded"
        );

        Self { profile, summary }
    }

    /// Whether neither document produced any text.
    pub fn is_empty(&self) -> bool {
        self.profile.is_empty() && self.summary.is_empty()
    }
}

fn load_profile(path: &Path) -> String {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        extract_pdf_text(path)
    } else {
        read_text(path)
    }
}

fn extract_pdf_text(path: &Path) -> String {
    if !path.is_file() {
        warn!(path = %path.display(), "profile document not found");
        return String::new();
    }

    // pdf-extract panics on some malformed documents instead of erroring.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text(path));

    match extracted {
        Ok(Ok(text)) => {
            debug!(path = %path.display(), "extracted profile text from PDF");
            text
        }
        Ok(Err(e)) => {
            warn!(path = %path.display(), error = %e, "failed to extract PDF text");
            String::new()
        }
        Err(_) => {
            warn!(path = %path.display(), "PDF extraction panicked");
            String::new()
        }
    }
}

fn read_text(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), "loaded text document");
            text
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read document");
            String::new()
        }
    }
}
