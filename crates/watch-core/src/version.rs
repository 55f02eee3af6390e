//! Runtime version ordering for the status view.
//!
//! Travis matrix labels are often partial versions (`"6"`, `"4.2"`). They are
//! padded to three segments before semver comparison so `"6"` sorts next to
//! `"6.0.0"` rather than lexically.

use std::cmp::Ordering;

use semver::Version;

/// Pad a version label to three dot-separated segments.
///
/// Missing or empty leading segments become `0`; segments beyond the third
/// are kept as-is.
pub fn normalize_version(label: &str) -> String {
    let mut segs: Vec<&str> = label.split('.').collect();
    while segs.len() < 3 {
        segs.push("");
    }
    for seg in segs.iter_mut().take(3) {
        if seg.is_empty() {
            *seg = "0";
        }
    }
    segs.join(".")
}

fn parse_label(label: &str) -> Option<Version> {
    Version::parse(&normalize_version(label)).ok()
}

/// Total order over version labels.
///
/// Labels that parse as versions after normalisation compare by semver
/// precedence, ties broken by the raw label. Labels that do not parse
/// (`"node"`, `"lts/*"`) sort after all versions, lexically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_label(a), parse_label(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
