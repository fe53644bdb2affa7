use std::path::{Path, PathBuf};

/// Compute the output path for an approved conversion.
///
/// The input's extension is swapped for `target_ext`. When they already
/// match (case-insensitively), `.converted` is inserted before the
/// extension so the source file is never silently overwritten.
pub fn resolve_output_path(input: &Path, target_ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    let original_ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    if original_ext.eq_ignore_ascii_case(target_ext) {
        parent.join(format!("{}.converted.{}", stem, target_ext))
    } else {
        parent.join(format!("{}.{}", stem, target_ext))
    }
}

/// Infer an output file extension from a target language name.
///
/// Unknown languages fall back to "py", matching the default target.
pub fn extension_for_language(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "python" => "py",
        "javascript" => "js",
        "typescript" => "ts",
        "java" => "java",
        "c" => "c",
        "c++" | "cpp" => "cpp",
        "c#" => "cs",
        "go" => "go",
        "rust" => "rs",
        "ruby" => "rb",
        "php" => "php",
        "kotlin" => "kt",
        "swift" => "swift",
        "scala" => "scala",
        "cobol" => "cbl",
        _ => "py",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swaps_extension() {
        assert_eq!(
            resolve_output_path(Path::new("report.cbl"), "py"),
            PathBuf::from("report.py")
        );
    }

    #[test]
    fn test_same_extension_inserts_converted_marker() {
        assert_eq!(
            resolve_output_path(Path::new("report.py"), "py"),
            PathBuf::from("report.converted.py")
        );
    }

    #[test]
    fn test_extension_compare_is_case_insensitive() {
        assert_eq!(
            resolve_output_path(Path::new("report.PY"), "py"),
            PathBuf::from("report.converted.py")
        );
    }

    #[test]
    fn test_keeps_parent_directory() {
        assert_eq!(
            resolve_output_path(Path::new("src/legacy/report.cbl"), "py"),
            PathBuf::from("src/legacy/report.py")
        );
    }

    #[test]
    fn test_input_without_extension() {
        assert_eq!(
            resolve_output_path(Path::new("Makefile"), "py"),
            PathBuf::from("Makefile.py")
        );
    }

    #[test]
    fn test_extension_for_language() {
        assert_eq!(extension_for_language("python"), "py");
        assert_eq!(extension_for_language("Rust"), "rs");
        assert_eq!(extension_for_language("COBOL"), "cbl");
        assert_eq!(extension_for_language("c++"), "cpp");
        assert_eq!(extension_for_language("brainfuck"), "py");
    }
}
