//! Include resolution against real files on disk.
//!
//! Includes resolve relative to the directory of the input document and are
//! spliced in verbatim without further directive processing.

use std::fs;
use std::path::Path;

use md_preprocess::{preprocess, ErrorKind, PreprocessError, PreprocessorConfig};
use pretty_assertions::assert_eq;

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn test_include_relative_to_input_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "book/chapters/one.md", "## One\n");
    write(
        dir.path(),
        "book/index.md",
        "# Book\n{% include chapters/one.md %}",
    );

    let input_path = dir.path().join("book/index.md");
    let input = fs::read_to_string(&input_path).unwrap();
    let config = PreprocessorConfig::from_input_path(Some(input_path.as_path()));

    assert_eq!(preprocess(&input, &config).unwrap(), "# Book\n## One\n");
}

#[test]
fn test_included_directives_are_emitted_raw() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "snippet.md", "value: {% X %}\n");

    let config = PreprocessorConfig::new().with_base_dir(dir.path());
    let out = preprocess("{% define X 1 %}{% include snippet.md %}", &config).unwrap();

    assert_eq!(out, "value: {% X %}\n");
}

#[test]
fn test_missing_include_names_requested_and_resolved_paths() {
    let dir = tempfile::tempdir().unwrap();
    let config = PreprocessorConfig::new().with_base_dir(dir.path());

    let err = preprocess("{% include missing.md %}", &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedInclude);

    let resolved = dir.path().join("missing.md");
    let msg = err.to_string();
    assert!(msg.contains("missing.md"));
    assert!(msg.contains(&resolved.display().to_string()));
}

#[test]
fn test_include_of_directory_is_unresolved() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("partials")).unwrap();
    let config = PreprocessorConfig::new().with_base_dir(dir.path());

    let err = preprocess("{% include partials %}", &config).unwrap_err();
    assert!(matches!(err, PreprocessError::UnresolvedInclude { .. }));
}

#[test]
fn test_include_path_with_spaces_is_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "release notes.md", "notes");
    let config = PreprocessorConfig::new().with_base_dir(dir.path());

    assert_eq!(
        preprocess("[{%   include   release notes.md   %}]", &config).unwrap(),
        "[notes]"
    );
}
