use std::path::Path;

/// Suffix that marks a merge candidate. Matched case-sensitively.
pub const JSON_SUFFIX: &str = ".json";

/// Return true if the path is a regular file whose name ends in `.json`
pub fn is_json_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(JSON_SUFFIX))
}

/// Derive the company key by removing exactly one trailing `.json`.
pub fn company_key(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(JSON_SUFFIX)
}
