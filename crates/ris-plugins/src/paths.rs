//! Lexical path helpers for subtree prefixes.
//!
//! Git subtree prefixes are forward-slash paths relative to the repository
//! root. The helpers here work on path components only and never touch the
//! filesystem, since the plugins directory may not exist yet.

use std::path::{Component, Path, PathBuf};

/// Removes `.` components and folds `..` into the preceding component.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Path leading from `base` to `target`, both taken lexically.
pub(crate) fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let normalized_base = normalize(base);
    let normalized_target = normalize(target);
    let mut base_components = normalized_base.components().peekable();
    let mut target_components = normalized_target.components().peekable();

    while let (Some(left), Some(right)) = (base_components.peek(), target_components.peek()) {
        if left != right {
            break;
        }
        base_components.next();
        target_components.next();
    }

    let mut relative = PathBuf::new();
    for _ in base_components {
        relative.push("..");
    }
    for component in target_components {
        relative.push(component.as_os_str());
    }
    relative
}

/// Renders normal components joined by `/`.
pub(crate) fn path_to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some(String::from("..")),
            _ => None,
        })
        .collect::<Vec<String>>()
        .join("/")
}
