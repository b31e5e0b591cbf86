/// Extract a short type name from the full module path.
///
/// Given `"sentinel_pipeline::components::status_filter::StatusFilter"`,
/// returns `"StatusFilter"`. Used for stage names in logs.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// Collapse a list of product ids into a short log-friendly string.
pub fn preview_ids(ids: &[String], max: usize) -> String {
    if ids.len() <= max {
        ids.join(", ")
    } else {
        format!("{}, +{} more", ids[..max].join(", "), ids.len() - max)
    }
}
