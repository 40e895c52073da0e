use std::path::{Path, PathBuf};

/// `{dir}/{id}.{format}`; its presence is the resume marker for `id`.
pub fn target_path(dir: &Path, id: u64, format: &str) -> PathBuf {
    dir.join(format!("{}.{}", id, format))
}

/// Sibling the body is streamed into before the final rename.
pub fn part_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

/// First requested format already present on disk for `id`.
pub fn find_existing(dir: &Path, id: u64, formats: &[String]) -> Option<PathBuf> {
    formats
        .iter()
        .map(|format| target_path(dir, id, format))
        .find(|path| path.is_file())
}
