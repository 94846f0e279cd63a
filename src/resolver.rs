use std::path::{Path, PathBuf};

use crate::error::AnalyzeError;
use crate::language::{KNOWN_EXTENSIONS, Language};

/// Resolves raw relative import specifiers (`./utils`, `../lib/data.js`) to
/// concrete, normalized file paths.
///
/// One instance is built per run and shared across rayon workers — resolution
/// only reads the filesystem, so `&ModuleResolver` is freely `Sync`.
pub struct ModuleResolver {
    base_path: PathBuf,
    /// Extension probed first, derived from the primary language in scope.
    primary_extension: &'static str,
}

impl ModuleResolver {
    pub fn new(base_path: impl Into<PathBuf>, primary: Language) -> Self {
        Self {
            base_path: base_path.into(),
            primary_extension: primary.extension(),
        }
    }

    /// Resolve a relative specifier from the perspective of `importer` (the file
    /// containing the import), falling back to the base path when the importing
    /// file is unknown.
    ///
    /// Resolution order:
    /// 1. Specifier already carries a recognized extension: accept verbatim.
    /// 2. Probe `<dir>/<specifier>.<primary extension>` on disk.
    /// 3. Glob-search `<base>/**/<specifier stem>.<primary extension>`.
    /// 4. Probe the remaining extensions from the fixed preference list.
    ///
    /// Every returned path is normalized so that two resolutions of logically
    /// identical paths compare equal.
    pub fn resolve(&self, specifier: &str, importer: Option<&Path>) -> Result<String, AnalyzeError> {
        let dir = importer
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_path.clone());

        let candidate = dir.join(specifier);

        if has_known_extension(specifier) {
            return Ok(normalize_path(&candidate.to_string_lossy()));
        }

        let direct = append_extension(&candidate, self.primary_extension);
        if direct.exists() {
            return Ok(normalize_path(&direct.to_string_lossy()));
        }

        if let Some(found) = self.glob_search(specifier) {
            return Ok(found);
        }

        for ext in KNOWN_EXTENSIONS {
            if *ext == self.primary_extension {
                continue;
            }
            let alternate = append_extension(&candidate, ext);
            if alternate.exists() {
                return Ok(normalize_path(&alternate.to_string_lossy()));
            }
        }

        Err(AnalyzeError::UnresolvedImport {
            specifier: specifier.to_owned(),
        })
    }

    /// Pattern-based fallback: search anywhere under the base path for a file
    /// matching the specifier stem. Catches imports written relative to a
    /// different root than the importing file.
    fn glob_search(&self, specifier: &str) -> Option<String> {
        let stem = specifier_stem(specifier);
        if stem.is_empty() {
            return None;
        }

        // A base of "." normalizes to the empty string; rooting the pattern
        // there would turn "/**/..." into a whole-filesystem scan.
        let base = normalize_path(&self.base_path.to_string_lossy());
        let root = if base.is_empty() { "." } else { base.as_str() };

        let pattern = format!("{}/**/{}.{}", root, stem, self.primary_extension);

        let entries = glob::glob(&pattern).ok()?;
        entries
            .flatten()
            .next()
            .map(|p| normalize_path(&p.to_string_lossy()))
    }
}

/// Strip leading `./` and `../` segments, leaving the path part of a specifier
/// usable as a glob suffix (`../utils/data` -> `utils/data`).
fn specifier_stem(specifier: &str) -> &str {
    let mut rest = specifier;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else {
            return rest;
        }
    }
}

/// True if the path's final segment ends in an extension the analyzer knows.
pub fn has_known_extension(path: &str) -> bool {
    let last = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && KNOWN_EXTENSIONS.contains(&ext),
        None => false,
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Normalize a path string: forward separators only, no empty or `.` segments,
/// `..` resolved lexically against preceding segments.
pub fn normalize_path(raw: &str) -> String {
    let replaced = raw.replace('\\', "/");
    let absolute = replaced.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in replaced.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[test]
    fn test_normalize_removes_dot_segments() {
        assert_eq!(normalize_path("./src/./app"), "src/app");
        assert_eq!(normalize_path("src//app"), "src/app");
        assert_eq!(normalize_path("src\\utils\\data"), "src/utils/data");
    }

    #[test]
    fn test_normalize_resolves_parent_segments() {
        assert_eq!(normalize_path("src/utils/../app"), "src/app");
        assert_eq!(normalize_path("/proj/src/../lib/x"), "/proj/lib/x");
        assert_eq!(normalize_path("../shared/x"), "../shared/x");
    }

    #[test]
    fn test_has_known_extension() {
        assert!(has_known_extension("./utils.ts"));
        assert!(has_known_extension("../data/config.json"));
        assert!(!has_known_extension("./utils"));
        assert!(!has_known_extension("./utils.css"));
        assert!(!has_known_extension("./.ts"));
    }

    #[test]
    fn test_resolve_existing_file_with_primary_extension() {
        let dir = tmp();
        fs::write(dir.path().join("utils.ts"), "export const x = 1;").unwrap();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);

        let importer = dir.path().join("app.ts");
        let resolved = resolver.resolve("./utils", Some(&importer)).unwrap();
        assert!(resolved.ends_with("/utils.ts"), "got {resolved}");
    }

    #[test]
    fn test_resolve_equivalent_spellings_compare_equal() {
        let dir = tmp();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/data.ts"), "export const d = 1;").unwrap();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);

        let importer = dir.path().join("app.ts");
        let deep_importer = dir.path().join("lib/inner.ts");

        let a = resolver.resolve("./lib/data", Some(&importer)).unwrap();
        let b = resolver.resolve("././lib//data", Some(&importer)).unwrap();
        let c = resolver.resolve("../lib/data", Some(&deep_importer)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_resolve_falls_back_to_alternate_extensions() {
        let dir = tmp();
        fs::write(dir.path().join("legacy.js"), "module.exports = {};").unwrap();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);

        let importer = dir.path().join("app.ts");
        let resolved = resolver.resolve("./legacy", Some(&importer)).unwrap();
        assert!(resolved.ends_with("/legacy.js"), "got {resolved}");
    }

    #[test]
    fn test_resolve_accepts_explicit_extension_verbatim() {
        let dir = tmp();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);
        let importer = dir.path().join("app.ts");

        // No existence check for explicit extensions.
        let resolved = resolver.resolve("./styles.json", Some(&importer)).unwrap();
        assert!(resolved.ends_with("/styles.json"), "got {resolved}");
    }

    #[test]
    fn test_resolve_glob_fallback_finds_nested_file() {
        let dir = tmp();
        fs::create_dir_all(dir.path().join("src/utils")).unwrap();
        fs::write(dir.path().join("src/utils/format.ts"), "export {}").unwrap();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);

        // Importer sits elsewhere, so the direct probe misses and the glob
        // search rooted at the base finds the file.
        let importer = dir.path().join("scripts/gen.ts");
        let resolved = resolver.resolve("./utils/format", Some(&importer)).unwrap();
        assert!(resolved.ends_with("src/utils/format.ts"), "got {resolved}");
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let dir = tmp();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);
        let importer = dir.path().join("app.ts");

        let err = resolver.resolve("./missing", Some(&importer)).unwrap_err();
        assert!(matches!(err, AnalyzeError::UnresolvedImport { .. }));
    }

    #[test]
    fn test_dot_base_stays_inside_the_working_directory() {
        // With base "." the glob fallback must search from the current
        // directory, never from the filesystem root.
        let resolver = ModuleResolver::new(".", Language::Ts);
        let importer = PathBuf::from("./app.ts");

        let err = resolver
            .resolve("./no_such_module_under_cwd_94c1", Some(&importer))
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::UnresolvedImport { .. }));
    }

    #[test]
    fn test_resolve_without_importer_uses_base_path() {
        let dir = tmp();
        fs::write(dir.path().join("root.ts"), "export {}").unwrap();
        let resolver = ModuleResolver::new(dir.path(), Language::Ts);

        let resolved = resolver.resolve("./root", None).unwrap();
        assert!(resolved.ends_with("/root.ts"), "got {resolved}");
    }
}
