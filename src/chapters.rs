use std::fmt::Write;

use serde::Serialize;

use crate::diagnostics::{Diagnosed, Diagnostic};
use crate::time::{ChapterTime, format_time};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChapterRecord {
    pub title: Option<String>,
    pub start_time: ChapterTime,
    pub end_time: ChapterTime,
}

impl ChapterRecord {
    pub fn new(title: Option<&str>, start_time: ChapterTime, end_time: ChapterTime) -> Self {
        Self {
            title: title.map(str::to_owned),
            start_time,
            end_time,
        }
    }

    pub fn is_resolved(&self) -> bool {
        match (self.start_time.known(), self.end_time.known()) {
            (Some(start), Some(end)) => start <= end,
            _ => false,
        }
    }
}

/// Fills in unknown chapter boundaries from the neighbouring chapters.
///
/// A missing start borrows the previous chapter's end, a missing end borrows
/// the next chapter's start, and the first chapter starts at zero. Only the
/// immediate neighbour is consulted: two adjacent unknown boundaries stay
/// unknown and each one is reported. Known values are never replaced.
pub fn resolve(mut records: Vec<ChapterRecord>) -> Diagnosed<Vec<ChapterRecord>> {
    let mut diagnostics = Vec::new();
    let last = records.len().saturating_sub(1);

    for i in 0..records.len() {
        if !records[i].start_time.is_known() {
            if i == 0 {
                diagnostics.push(Diagnostic::info(
                    Some(i),
                    format!(
                        "start time {}, assuming the start of the file",
                        describe(&records[i].start_time)
                    ),
                ));
                records[i].start_time = ChapterTime::At(0);
            } else if let Some(previous_end) = records[i - 1].end_time.known() {
                records[i].start_time = ChapterTime::At(previous_end);
            } else {
                diagnostics.push(Diagnostic::warning(
                    Some(i),
                    format!(
                        "start time {} and the previous chapter has no end time, cannot be resolved",
                        describe(&records[i].start_time)
                    ),
                ));
            }
        }

        if !records[i].end_time.is_known() {
            if i == last {
                diagnostics.push(Diagnostic::warning(
                    Some(i),
                    format!(
                        "end time {} on the last chapter, cannot be inferred",
                        describe(&records[i].end_time)
                    ),
                ));
            } else if let Some(next_start) = records[i + 1].start_time.known() {
                records[i].end_time = ChapterTime::At(next_start);
            } else {
                diagnostics.push(Diagnostic::warning(
                    Some(i),
                    format!(
                        "end time {} and the next chapter has no start time, cannot be resolved",
                        describe(&records[i].end_time)
                    ),
                ));
            }
        }

        if let (Some(start), Some(end)) =
            (records[i].start_time.known(), records[i].end_time.known())
        {
            if start > end {
                diagnostics.push(Diagnostic::warning(
                    Some(i),
                    format!(
                        "ends at {} before it starts at {}",
                        format_time(end),
                        format_time(start)
                    ),
                ));
            }
        }
    }

    Diagnosed::new(records, diagnostics)
}

fn describe(time: &ChapterTime) -> String {
    match time {
        ChapterTime::Invalid(raw) => format!("\"{raw}\" is not a valid time"),
        _ => "is missing".to_owned(),
    }
}

/// One line per chapter, for debug output.
pub fn summary(records: &[ChapterRecord]) -> String {
    let mut output = String::new();

    for record in records {
        let show = |time: &ChapterTime| match time.known() {
            Some(ms) => format_time(ms),
            None => "???".to_owned(),
        };
        let _ = writeln!(
            &mut output,
            "Start: {:<12} End: {:<12} Title: {}",
            show(&record.start_time),
            show(&record.end_time),
            record.title.as_deref().unwrap_or("")
        );
    }

    output
}
