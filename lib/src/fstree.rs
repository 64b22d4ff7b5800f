use std::sync::Arc;
use std::path::Path;
use std::fs;

use crate::error::{Chainable, Result};

/// The immediate children of a single directory, sorted by file name.
#[derive(Debug)]
pub struct FsDir {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub path: Arc<Path>,
    pub file_name: String,
    pub file_type: fs::FileType,
}

impl FsDir {
    /// Lists `root` without descending into subdirectories. Hidden files are
    /// listed too; symlinks are followed. The walk runs on the calling thread.
    pub fn read<P: AsRef<Path>>(root: P) -> Result<Self> {
        use jwalk::{Parallelism, WalkDir};

        let root = root.as_ref();
        let metadata = fs::metadata(root).chain_with(|| error! {
            "failed to read directory",
            "path" => root.display(),
        })?;

        if !metadata.is_dir() {
            return err! {
                "path is not a directory",
                "path" => root.display(),
            };
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort(true)
            .skip_hidden(false)
            .follow_links(true)
            .parallelism(Parallelism::Serial);

        let mut entries = vec![];
        for entry in walker {
            let entry = entry.chain_with(|| error! {
                "failed to list directory",
                "path" => root.display(),
            })?;

            entries.push(Entry {
                path: Arc::from(entry.path().into_boxed_path()),
                file_name: entry.file_name.to_string_lossy().into_owned(),
                file_type: entry.file_type,
            });
        }

        Ok(FsDir { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Regular files whose complete extension is exactly `ext`.
    pub fn files_with_ext<'a>(&'a self, ext: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.iter().filter(move |e| e.file_type.is_file() && e.file_ext() == Some(ext))
    }
}

impl Entry {
    /// The complete extension, if any.
    pub fn file_ext(&self) -> Option<&str> {
        self.file_name.rsplit_once('.').map(|(_, right)| right)
    }
}
