//! Relative path helpers shared by folders and files.

/// Join a parent directory and a child name with `/`.
///
/// An empty or missing parent yields the child unchanged.
pub fn join_path(parent: &str, child: &str) -> String {
    let parent = parent.trim_matches('/');
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}/{child}")
    }
}

/// Resolved directory path for a folder with the given parent path and slug.
pub fn folder_path(parent_folder: Option<&str>, slug: &str) -> String {
    join_path(parent_folder.unwrap_or_default(), slug)
}

/// Whether `path` is `ancestor` itself or lies below it.
pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}
