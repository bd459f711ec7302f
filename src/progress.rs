use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::store::{self, StoreError};

/// Ids of questions the user has already answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: BTreeSet<String>,
}

impl CompletionSet {
    /// A missing file is an empty set. So is a file that is not a JSON
    /// array; that case is logged and the bad file is left in place until the
    /// next save overwrites it. Scalar entries (numbers, booleans) are kept as
    /// their string form; nested values and nulls are skipped.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let Some(text) = store::read_optional(path)? else {
            return Ok(Self::default());
        };
        let items = match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable progress file");
                return Ok(Self::default());
            }
        };

        let total = items.len();
        let set: Self = items.into_iter().filter_map(id_from_json).collect();
        if set.len() < total {
            debug!(path = %path.display(), kept = set.len(), total, "progress entries merged or skipped");
        }
        Ok(set)
    }

    /// Sorted, duplicate-free JSON array, written atomically.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        let json = serde_json::to_vec_pretty(&ids).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        store::write_atomic(path, &json)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn id_from_json(item: Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl FromIterator<String> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        CompletionSet {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<String> for CompletionSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

// ── Tests ──
