//! Post discovery.
//!
//! Posts live exactly three levels below the base directory:
//!
//! ```text
//! posts/
//!   2024/            (level 1)
//!     06/            (level 2)
//!       2024-06-01_my-post/   (post)
//!         _metadata.yml
//! ```
//!
//! Each level is sorted by file name so every run sees posts in the same order.

use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};
use crate::types::PostDir;

/// Number of directory levels between the base directory and a post.
pub const POST_DEPTH: usize = 3;

/// Return every post directory under `base`, in deterministic order.
///
/// A missing `base` yields an empty list. Files and dot-directories are ignored
/// at every level.
pub fn find_posts(base: &Path) -> Result<Vec<PostDir>, CoreError> {
    if !base.exists() {
        tracing::warn!(path = %base.display(), "posts directory does not exist");
        return Ok(vec![]);
    }

    let mut level = vec![base.to_path_buf()];
    for _ in 0..POST_DEPTH {
        let mut next = Vec::new();
        for dir in &level {
            next.extend(child_dirs(dir)?);
        }
        level = next;
    }
    Ok(level.into_iter().map(PostDir).collect())
}

fn child_dirs(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries.into_iter().map(|e| e.path()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_base_is_empty() {
        let tmp = TempDir::new().unwrap();
        let posts = find_posts(&tmp.path().join("posts")).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn shallow_dirs_are_not_posts() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("2024").join("06")).unwrap();
        let posts = find_posts(tmp.path()).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn finds_posts_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        for p in [
            "2024/06/2024-06-15_b",
            "2023/12/2023-12-01_a",
            "2024/06/2024-06-01_a",
            "2024/01/2024-01-09_c",
        ] {
            std::fs::create_dir_all(tmp.path().join(p)).unwrap();
        }
        let names: Vec<String> = find_posts(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(
            names,
            vec!["2023-12-01_a", "2024-01-09_c", "2024-06-01_a", "2024-06-15_b"]
        );
    }

    #[test]
    fn files_and_hidden_dirs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("2024/06/2024-06-01_a")).unwrap();
        std::fs::create_dir_all(tmp.path().join("2024/.cache/x")).unwrap();
        std::fs::write(tmp.path().join("2024/06/notes.txt"), "x").unwrap();
        let posts = find_posts(tmp.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].name(), "2024-06-01_a");
    }
}
