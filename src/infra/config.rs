use std::path::PathBuf;

/// Conventional location of deployment directories when nothing is configured
pub const DEFAULT_BASE_PATHS: &str = "/opt/docker";

/// Splits the comma-separated base path list, trimming entries, dropping
/// empty ones and expanding a leading `~`.
pub fn parse_base_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| PathBuf::from(shellexpand::tilde(entry).into_owned()))
        .collect()
}
