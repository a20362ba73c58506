//! Directory walking and path normalization.
//!
//! Walks are depth-first in file-name order with symlinks not followed, so
//! query output is deterministic for a given tree. Paths are compared and
//! reported in lexically cleaned form.

use std::fs::Metadata;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};
use walkdir::WalkDir;

/// A single walked entry: its cleaned path plus the metadata the walk
/// already statted (without following symlinks).
#[derive(Debug)]
pub struct FileInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub metadata: Metadata,
}

impl FileInfo {
    fn from_entry(entry: walkdir::DirEntry) -> Result<FileInfo, walkdir::Error> {
        let metadata = entry.metadata()?;
        Ok(FileInfo {
            path: clean(entry.path()),
            file_name: entry.file_name().to_string_lossy().into_owned(),
            metadata,
        })
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.metadata.is_file()
    }

    pub fn size(&self) -> i64 {
        self.metadata.len() as i64
    }

    pub fn modified(&self) -> io::Result<DateTime<Local>> {
        Ok(self.metadata.modified()?.into())
    }

    /// Renders the entry's type and permission bits in `ls -l` style,
    /// e.g. `drwxr-xr-x`.
    #[cfg(unix)]
    pub fn mode_string(&self) -> String {
        use std::os::unix::fs::PermissionsExt;

        let file_type = self.metadata.file_type();
        let kind = if file_type.is_dir() {
            'd'
        } else if file_type.is_symlink() {
            'l'
        } else {
            '-'
        };

        let mode = self.metadata.permissions().mode();
        let mut out = String::with_capacity(10);
        out.push(kind);
        for shift in [6u32, 3, 0] {
            let bits = (mode >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }

    #[cfg(not(unix))]
    pub fn mode_string(&self) -> String {
        let kind = if self.metadata.is_dir() { 'd' } else { '-' };
        let perms = if self.metadata.permissions().readonly() {
            "r--r--r--"
        } else {
            "rw-rw-rw-"
        };
        format!("{}{}", kind, perms)
    }
}

/// Walks `root` depth-first in file-name order. `prune` is consulted with
/// each cleaned path; returning true skips the entry and, for directories,
/// the whole subtree beneath it.
pub fn entries<P>(
    root: impl AsRef<Path>,
    mut prune: P,
) -> impl Iterator<Item = Result<FileInfo, walkdir::Error>>
where
    P: FnMut(&Path) -> bool,
{
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !prune(&clean(entry.path())))
        .map(|entry| entry.and_then(FileInfo::from_entry))
}

/// Lexically normalizes a path: drops `.` components, resolves `..` against
/// preceding components where possible, and removes redundant separators.
/// The empty path cleans to `.`.
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    let mut out = PathBuf::new();
    for comp in parts {
        out.push(comp.as_os_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean() {
        let cases = vec![
            ("", "."),
            (".", "."),
            ("./", "."),
            ("./foo", "foo"),
            ("foo/", "foo"),
            ("foo//bar", "foo/bar"),
            ("foo/./bar", "foo/bar"),
            ("foo/../bar", "bar"),
            ("foo/bar/..", "foo"),
            ("foo/..", "."),
            ("../foo", "../foo"),
            ("/", "/"),
            ("/../foo", "/foo"),
            ("/foo/./bar/", "/foo/bar"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                clean(Path::new(input)),
                PathBuf::from(expected),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_entries_walks_in_file_name_order() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("c"), b"").unwrap();
        fs::write(root.join("a"), b"").unwrap();
        fs::create_dir(root.join("b")).unwrap();
        fs::write(root.join("b").join("nested"), b"").unwrap();

        let names: Vec<String> = entries(root, |_| false)
            .map(|e| e.unwrap().file_name)
            .collect();

        let root_name = root.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(names, vec![root_name, "a".into(), "b".into(), "nested".into(), "c".into()]);
    }

    #[test]
    fn test_entries_prunes_subtrees() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("keep")).unwrap();
        fs::write(root.join("keep").join("inner"), b"").unwrap();
        fs::create_dir(root.join("skip")).unwrap();
        fs::write(root.join("skip").join("hidden"), b"").unwrap();

        let skipped = clean(&root.join("skip"));
        let names: Vec<String> = entries(root, |path| path == skipped)
            .map(|e| e.unwrap().file_name)
            .collect();

        assert!(names.contains(&"keep".to_string()));
        assert!(names.contains(&"inner".to_string()));
        assert!(!names.contains(&"skip".to_string()));
        assert!(!names.contains(&"hidden".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_string() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, b"contents").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let info = entries(&path, |_| false).next().unwrap().unwrap();
        assert_eq!(info.mode_string(), "-rw-r--r--");

        let root_info = entries(dir.path(), |_| false).next().unwrap().unwrap();
        assert!(root_info.mode_string().starts_with('d'));
    }
}
