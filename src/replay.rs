use serde::Serialize;

use crate::schema::{parse_frame, Vector3};
use crate::sync::{ProcessReport, Registry, RenderAdapter, TrackedObject};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub malformed_frames: usize,
    pub records: ProcessReport,
}

#[derive(Debug, Serialize)]
pub struct ObjectSummary<'a> {
    #[serde(flatten)]
    pub object: &'a TrackedObject,
    pub trail: Vec<Vector3>,
}

/// Applies recorded frames, one JSON message per line, in order.
pub fn replay<A: RenderAdapter>(registry: &mut Registry<A>, content: &str) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        summary.frames += 1;
        match parse_frame(line.as_bytes()) {
            Ok(message) => {
                let report = registry.process_message(&message);
                summary.records.created += report.created;
                summary.records.updated += report.updated;
                summary.records.skipped += report.skipped;
            }
            Err(e) => {
                summary.malformed_frames += 1;
                log::warn!("Line {}: {}", line_no + 1, e);
            }
        }
    }

    summary
}

pub fn summarize<A: RenderAdapter>(registry: &Registry<A>) -> Vec<ObjectSummary<'_>> {
    registry
        .objects()
        .into_iter()
        .map(|(object, trail)| ObjectSummary {
            object,
            trail: trail.snapshot(),
        })
        .collect()
}
