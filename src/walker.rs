use std::path::PathBuf;

use crate::language::Language;

/// Expand a glob pattern and keep files whose extension belongs to one of
/// the requested languages. Paths matching an exclude substring are dropped,
/// `node_modules` always is. Unreadable matches are skipped.
pub fn discover_files(
    pattern: &str,
    languages: &[Language],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let extensions: Vec<&str> = languages.iter().map(|l| l.extension()).collect();

    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = match entry {
            Ok(p) => p,
            Err(_) => continue,
        };
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !extensions.contains(&ext) {
            continue;
        }
        if is_excluded(&path, exclude) {
            continue;
        }
        files.push(path);
    }

    Ok(files)
}

fn is_excluded(path: &std::path::Path, exclude: &[String]) -> bool {
    let text = path.to_string_lossy();
    text.contains("node_modules") || exclude.iter().any(|pattern| text.contains(pattern.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn touch(dir: &TempDir, rel: &str) {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, "export {};\n").expect("write file");
    }

    #[test]
    fn test_filters_by_language_extension() {
        let dir = tmp();
        touch(&dir, "a.ts");
        touch(&dir, "b.js");
        touch(&dir, "c.css");
        let pattern = format!("{}/**/*", dir.path().display());
        let files = discover_files(&pattern, &[Language::Ts], &[]).expect("discover");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.ts"));
    }

    #[test]
    fn test_multiple_languages() {
        let dir = tmp();
        touch(&dir, "a.ts");
        touch(&dir, "b.jsx");
        let pattern = format!("{}/**/*", dir.path().display());
        let files =
            discover_files(&pattern, &[Language::Ts, Language::Jsx], &[]).expect("discover");
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_node_modules_always_excluded() {
        let dir = tmp();
        touch(&dir, "src/a.ts");
        touch(&dir, "node_modules/pkg/index.ts");
        let pattern = format!("{}/**/*.ts", dir.path().display());
        let files = discover_files(&pattern, &[Language::Ts], &[]).expect("discover");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_config_excludes_applied() {
        let dir = tmp();
        touch(&dir, "src/a.ts");
        touch(&dir, "dist/a.ts");
        let pattern = format!("{}/**/*.ts", dir.path().display());
        let files =
            discover_files(&pattern, &[Language::Ts], &["dist".to_owned()]).expect("discover");
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("src"));
    }

    #[test]
    fn test_empty_match_returns_empty_vec() {
        let dir = tmp();
        let pattern = format!("{}/**/*.ts", dir.path().display());
        let files = discover_files(&pattern, &[Language::Ts], &[]).expect("discover");
        assert!(files.is_empty());
    }
}
