//! Common utility functions shared across the codebase.

use std::path::{Component, Path};

/// Render `path` relative to `root` with `/` separators, as written in
/// catalog references.
///
/// Paths outside `root` are rendered as given.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use makepot::utils::relative_display_path;
///
/// assert_eq!(
///     relative_display_path(Path::new("/srv/plugin"), Path::new("/srv/plugin/inc/admin.php")),
///     "inc/admin.php"
/// );
/// assert_eq!(
///     relative_display_path(Path::new("/srv/plugin"), Path::new("/srv/plugin/main.php")),
///     "main.php"
/// );
/// ```
pub fn relative_display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::CurDir => None,
            Component::ParentDir => Some("..".into()),
            Component::RootDir | Component::Prefix(_) => Some("".into()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
