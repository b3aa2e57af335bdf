//! Keeps `tests/unit` in lockstep with `src`: every source file has a unit test
//! file at the same relative path, and every test file contains tests

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    /// Entry points and module roots carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, base, found)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_| io::Error::other("path outside base directory"))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(())
    }

    fn relative_sources(dir: &str) -> BTreeSet<String> {
        let base = Path::new(dir);
        let mut found = BTreeSet::new();
        if let Err(error) = rust_files(base, base, &mut found) {
            panic!("failed to scan {dir}: {error}");
        }
        found.retain(|relative| !is_exempt(relative));
        found
    }

    // Tests every source file has a mirrored unit test file
    // Verified by deleting one unit test file
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let sources = relative_sources(SRC_DIR);
        let unit_tests = relative_sources(UNIT_DIR);

        let missing: Vec<String> = sources
            .difference(&unit_tests)
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();
        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = relative_sources(SRC_DIR);
        let unit_tests = relative_sources(UNIT_DIR);

        let orphaned: Vec<String> = unit_tests
            .difference(&sources)
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();
        assert!(
            orphaned.is_empty(),
            "Unit test files without sources:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every test file declares at least one test
    // Verified by emptying one test module
    #[test]
    fn test_all_test_files_contain_tests() {
        let base = Path::new(TESTS_DIR);
        let mut files = BTreeSet::new();
        if let Err(error) = rust_files(base, base, &mut files) {
            panic!("failed to scan {TESTS_DIR}: {error}");
        }

        let empty: Vec<String> = files
            .iter()
            .filter(|relative| !relative.ends_with("mod.rs"))
            .filter(|relative| {
                fs::read_to_string(base.join(relative))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|relative| format!("  - tests/{relative}"))
            .collect();
        assert!(
            empty.is_empty(),
            "Test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
