use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::parser::{self, ParseReport};
use crate::pdf;
use crate::record::QuestionRecord;
use crate::settings::Settings;

/// Errors surfaced by the JSON stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read a file, mapping "not found" to `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write to a sibling temp file, then rename over the target.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_extension(format!("{}.tmp.{}", ext, std::process::id()));

    std::fs::write(&tmp, bytes).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(())
}

/// Load the processed question store. `None` when the file does not exist.
pub fn load_questions(path: &Path) -> Result<Option<Vec<QuestionRecord>>, StoreError> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

pub fn save_questions(path: &Path, records: &[QuestionRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &json)
}

/// Where a question bank came from on this run.
#[derive(Debug)]
pub enum Bank {
    /// Read back from an existing store file.
    Stored(Vec<QuestionRecord>),
    /// Freshly parsed from source text.
    Parsed(ParseReport),
}

impl Bank {
    pub fn records(&self) -> &[QuestionRecord] {
        match self {
            Bank::Stored(records) => records,
            Bank::Parsed(report) => &report.records,
        }
    }

    pub fn into_records(self) -> Vec<QuestionRecord> {
        match self {
            Bank::Stored(records) => records,
            Bank::Parsed(report) => report.records,
        }
    }
}

/// Return the stored bank, or build it from `source` when the store is
/// missing or `force` is set.
///
/// The parse callback receives `(done, total)` segment counts. The store is
/// only written when the pipeline produced at least one record.
pub fn load_or_build<F>(
    settings: &Settings,
    source: &Path,
    force: bool,
    on_progress: F,
) -> anyhow::Result<Bank>
where
    F: FnMut(usize, usize),
{
    if !force {
        if let Some(records) = load_questions(&settings.questions_path)? {
            info!(
                path = %settings.questions_path.display(),
                count = records.len(),
                "loaded existing question store"
            );
            return Ok(Bank::Stored(records));
        }
    }

    let raw = pdf::load_source_text(source)?;
    let report = parser::parse_questions_with(&raw, on_progress);

    if report.records.is_empty() {
        warn!(
            segments = report.segments_seen,
            "no questions parsed; store left untouched"
        );
    } else {
        save_questions(&settings.questions_path, &report.records)?;
        info!(
            path = %settings.questions_path.display(),
            count = report.accepted(),
            "saved question store"
        );
    }
    Ok(Bank::Parsed(report))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CategoryPath, ChoiceKey, Choices, Difficulty};

    fn sample(id: &str) -> QuestionRecord {
        QuestionRecord {
            id: id.to_string(),
            category_path: CategoryPath::default(),
            difficulty: Difficulty::Easy,
            question_text: "Q?".into(),
            choices: Choices {
                a: "a".into(),
                b: "b".into(),
                c: "c".into(),
                d: "d".into(),
            },
            correct_answer: ChoiceKey::A,
            explanation: String::new(),
        }
    }

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            pdf_path: dir.join("bank.pdf"),
            questions_path: dir.join("processed/questions.json"),
            progress_path: dir.join("user/completed.json"),
        }
    }

    #[test]
    fn missing_store_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_questions(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/q.json");
        let records = vec![sample("aaaaaaaa"), sample("bbbbbbbb")];

        save_questions(&path, &records).unwrap();
        assert_eq!(load_questions(&path).unwrap(), Some(records));

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn corrupt_store_is_json_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();
        let err = load_questions(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().starts_with("malformed JSON in"));
    }

    #[test]
    fn existing_store_wins_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        save_questions(&settings.questions_path, &[sample("cccccccc")]).unwrap();

        // the source does not exist: reaching it would fail
        let missing = dir.path().join("absent.txt");
        let bank = load_or_build(&settings, &missing, false, |_, _| {}).unwrap();
        assert!(matches!(bank, Bank::Stored(_)));
        assert_eq!(bank.records()[0].id, "cccccccc");

        assert!(load_or_build(&settings, &missing, true, |_, _| {}).is_err());
    }

    #[test]
    fn builds_and_saves_from_text() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let bank = load_or_build(
            &settings,
            Path::new("tests/fixtures/ela_bank.txt"),
            false,
            |_, _| {},
        )
        .unwrap();

        let Bank::Parsed(report) = &bank else {
            panic!("expected a fresh parse");
        };
        assert_eq!(report.accepted(), 4);
        let stored = load_questions(&settings.questions_path).unwrap().unwrap();
        assert_eq!(stored, bank.into_records());
    }

    #[test]
    fn empty_parse_leaves_store_alone() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let source = dir.path().join("blank.txt");
        std::fs::write(&source, "nothing to see here").unwrap();

        let bank = load_or_build(&settings, &source, true, |_, _| {}).unwrap();
        assert!(bank.records().is_empty());
        assert!(!settings.questions_path.exists());
    }
}
