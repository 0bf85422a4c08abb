use std::path::{Path, PathBuf};

/// Next free sibling path by appending a counter (file.txt -> file_1.txt).
pub fn next_free_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let candidate = parent.join(format!("{}_{}{}", stem, counter, ext));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn free_path_is_returned_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        assert_eq!(next_free_path(&path), path);
    }

    #[test]
    fn occupied_path_gets_counter_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"x").unwrap();
        assert_eq!(next_free_path(&path), dir.path().join("report_1.pdf"));

        fs::write(dir.path().join("report_1.pdf"), b"x").unwrap();
        assert_eq!(next_free_path(&path), dir.path().join("report_2.pdf"));
    }

    #[test]
    fn extensionless_path_gets_counter_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("LICENSE");
        fs::write(&path, b"x").unwrap();
        assert_eq!(next_free_path(&path), dir.path().join("LICENSE_1"));
    }
}
