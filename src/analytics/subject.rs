// src/analytics/subject.rs

use crate::models::analytics::Subject;

/// Ordered classification rules; the first rule with a matching fragment wins.
/// Labels matching none of them fall into `Subject::Other`.
const SUBJECT_RULES: &[(&[&str], Subject)] = &[
    (&["phys"], Subject::Physics),
    (&["chem"], Subject::Chemistry),
    (&["bio", "botany", "zoology"], Subject::Biology),
];

/// Maps a free-text subject label onto its canonical bucket.
pub fn normalize_subject(raw: &str) -> Subject {
    let label = raw.trim().to_lowercase();

    SUBJECT_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| label.contains(f)))
        .map(|(_, subject)| *subject)
        .unwrap_or(Subject::Other)
}
