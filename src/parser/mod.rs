pub mod extract;
pub mod normalize;
pub mod segments;

use std::collections::HashSet;

use rayon::prelude::*;

use crate::record::QuestionRecord;
use extract::{RejectReason, Rejection};

const CHUNK_SIZE: usize = 64;

/// Outcome of one parse run: accepted records in document order plus the
/// per-segment rejections.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub records: Vec<QuestionRecord>,
    pub segments_seen: usize,
    pub rejections: Vec<Rejection>,
}

impl ParseReport {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }
}

/// Pipeline: raw text → normalized → segments → records.
pub fn parse_questions(raw: &str) -> ParseReport {
    parse_questions_with(raw, |_, _| {})
}

/// Same as [`parse_questions`], reporting `(done, total)` segment counts
/// after each chunk.
pub fn parse_questions_with<F>(raw: &str, mut on_progress: F) -> ParseReport
where
    F: FnMut(usize, usize),
{
    let text = normalize::normalize(raw);
    let segments = segments::split_segments(&text);
    let total = segments.len();

    let mut report = ParseReport {
        segments_seen: total,
        ..ParseReport::default()
    };
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut done = 0;

    for chunk in segments.chunks(CHUNK_SIZE) {
        let outcomes: Vec<_> = chunk.par_iter().map(extract::process_segment).collect();

        for outcome in outcomes {
            match outcome {
                Ok(record) if !seen_ids.insert(record.id.clone()) => {
                    report.rejections.push(Rejection {
                        id: record.id,
                        reason: RejectReason::DuplicateId,
                    });
                }
                Ok(record) => report.records.push(record),
                Err(rejection) => report.rejections.push(rejection),
            }
        }

        done += chunk.len();
        on_progress(done, total);
    }

    report
}

// ── Tests ──
