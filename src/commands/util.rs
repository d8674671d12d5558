use std::path::{Path, PathBuf};

/// Pick a report path under `dir` that does not exist yet: `<base><ext>`, then
/// `<base>_1<ext>`, `<base>_2<ext>`, ...
pub fn unique_report_path(dir: &Path, base_name: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{base_name}{extension}"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = dir.join(format!("{base_name}_{counter}{extension}"));
    }
    candidate
}
