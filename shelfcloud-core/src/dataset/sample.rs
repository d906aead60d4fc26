//! Built-in datasets used when the catalog file cannot be loaded.

use shelfcloud_types::{SubjectRecord, Weight};

const CODES: [&str; 5] = ["M", "HG", "PQ", "PT", "BJ"];

const SUBJECTS: [&str; 5] = [
    "music classical piano",
    "economics finance banking",
    "literature french poetry",
    "german literature fiction",
    "ethics philosophy morality",
];

const WEIGHTS: [Weight; 5] = [1, 2, 3, 1, 4];

const REPEAT: usize = 20;

const COMPACT_SUBJECTS: [&str; 5] = [
    "music classical piano symphony orchestra",
    "economics finance banking monetary policy",
    "literature french poetry novels drama",
    "german literature fiction novels poetry",
    "ethics philosophy morality conduct behavior",
];

const COMPACT_WEIGHTS: [Weight; 5] = [5, 3, 8, 2, 6];

/// 100 rows cycling through five codes; used when the file is absent.
///
/// Subjects are already in cleaned form and are not normalized again.
pub fn sample_records() -> Vec<SubjectRecord> {
    (0..CODES.len() * REPEAT)
        .map(|i| {
            let k = i % CODES.len();
            SubjectRecord::new(CODES[k], SUBJECTS[k], WEIGHTS[k])
        })
        .collect()
}

/// Five rows, one per code; used when the file exists but cannot be read.
pub fn compact_sample_records() -> Vec<SubjectRecord> {
    CODES
        .iter()
        .zip(COMPACT_SUBJECTS)
        .zip(COMPACT_WEIGHTS)
        .map(|((&code, subject), weight)| SubjectRecord::new(code, subject, weight))
        .collect()
}
