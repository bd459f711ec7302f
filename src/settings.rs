use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

const DEFAULT_PDF: &str = "data/raw_pdfs/SAT Suite Question Bank ELA - Results.pdf";
const DEFAULT_QUESTIONS: &str = "data/processed_questions/ela_questions.json";
const DEFAULT_PROGRESS: &str = "user_data/completed_questions.json";

/// File locations. Later sources win: defaults, then an optional
/// `sat_ela.{toml,json,yaml}` in the working directory, then `SAT_ELA_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub pdf_path: PathBuf,
    pub questions_path: PathBuf,
    pub progress_path: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("pdf_path", DEFAULT_PDF)?
            .set_default("questions_path", DEFAULT_QUESTIONS)?
            .set_default("progress_path", DEFAULT_PROGRESS)?
            .add_source(config::File::with_name("sat_ela").required(false))
            .add_source(config::Environment::with_prefix("SAT_ELA"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        pdf: Option<PathBuf>,
        questions: Option<PathBuf>,
        progress: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = pdf {
            self.pdf_path = p;
        }
        if let Some(p) = questions {
            self.questions_path = p;
        }
        if let Some(p) = progress {
            self.progress_path = p;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let s = Settings::load().unwrap();
        // SAT_ELA_* may be set in the environment; only check the override path
        let s = s.with_overrides(None, Some(PathBuf::from("q.json")), None);
        assert_eq!(s.questions_path, PathBuf::from("q.json"));
        assert!(!s.pdf_path.as_os_str().is_empty());
        assert!(!s.progress_path.as_os_str().is_empty());
    }
}
