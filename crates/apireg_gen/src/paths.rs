//! Slash-separated import path helpers.
//!
//! Import paths always use `/`, regardless of host platform, so these never go
//! through `std::path`. `parent` and `join` follow Go's `filepath.Dir` and
//! `filepath.Join` on such paths, which keeps derived locations identical to
//! trees generated by earlier tooling.

/// Everything but the last element of `path`. Returns `"."` for a single
/// element path.
pub fn parent(path: &str) -> String {
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => clean(&path[..idx]),
        None => ".".to_string(),
    }
}

/// Join path elements, dropping empty and `.` segments.
pub fn join(base: &str, elements: &[&str]) -> String {
    let mut joined = base.to_string();
    for element in elements {
        joined.push('/');
        joined.push_str(element);
    }
    clean(&joined)
}

/// Final element of `path`.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Go package name for a package directory: the final element, cut at the
/// first `.` (`v1.extra` names package `v1`).
pub fn package_name(path: &str) -> String {
    let base = last_segment(path);
    base.split('.').next().unwrap_or(base).to_string()
}

fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    match (rooted, segments.is_empty()) {
        (true, _) => format!("/{}", segments.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => segments.join("/"),
    }
}
