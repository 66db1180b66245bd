use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{ArcError, Result};

/// List the files below `root` in packing order, each paired with its
/// archive name.
///
/// Within a directory, files come first sorted by name, then each
/// subdirectory sorted by name. Names start with the normal components of
/// `root` itself and use `/` separators, so packing `./data` gives names
/// like `data/sub/file.bin`. Symlinked files are followed; symlinked
/// directories are skipped.
pub fn collect_files(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let prefix = archive_prefix(root)?;

    let mut files = Vec::new();
    walk_dir(root, &prefix, &mut files)?;
    Ok(files)
}

fn archive_prefix(root: &Path) -> Result<String> {
    let parts: Vec<String> = root
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return Err(ArcError::UnsafeEntryName(root.display().to_string()));
    }

    Ok(parts.join("/"))
}

fn walk_dir(dir: &Path, name: &str, files: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let mut plain = Vec::new();
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            subdirs.push((entry.file_name(), path));
        } else if file_type.is_symlink() && path.is_dir() {
            // Links back up the tree would recurse forever
            log::warn!("skipping symlinked directory {}", path.display());
        } else {
            plain.push((entry.file_name(), path));
        }
    }

    plain.sort();
    subdirs.sort();

    for (file_name, path) in plain {
        files.push((format!("{}/{}", name, file_name.to_string_lossy()), path));
    }

    for (dir_name, path) in subdirs {
        let sub_name = format!("{}/{}", name, dir_name.to_string_lossy());
        walk_dir(&path, &sub_name, files)?;
    }

    Ok(())
}
