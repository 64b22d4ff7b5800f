use std::path::Path;

use crate::error::Error;
use crate::fstree::Entry;
use crate::record::{CatalogRecord, InvalidField};

/// Receives the extractor's diagnostics. Nothing the extractor does depends
/// on what a reporter does with them.
pub trait Reporter {
    fn scanning(&self, _dir: &Path) { }

    fn discovered(&self, _files: &[&Entry]) { }

    fn parsed(&self, _path: &Path, _record: &CatalogRecord) { }

    /// `id` was already taken by `previous`; the record from `path` wins.
    fn replaced(&self, _id: &str, _previous: &Path, _path: &Path) { }

    /// The samples directory couldn't be listed; the catalog will be empty.
    fn unreadable_dir(&self, _dir: &Path, _error: &Error) { }

    /// A file's front matter failed to decode; its defaults are used.
    fn malformed(&self, _path: &Path, _error: &Error) { }

    /// One front matter field had an unusable value and was left to its
    /// default. The file's other fields are unaffected.
    fn invalid_field(&self, _path: &Path, _field: &InvalidField) { }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent { }

/// Emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn scanning(&self, dir: &Path) {
        tracing::info!(dir = %dir.display(), "scanning samples directory");
    }

    fn discovered(&self, files: &[&Entry]) {
        tracing::info!(count = files.len(), "discovered sample files");
        for file in files {
            tracing::debug!(file = %file.file_name, "discovered");
        }
    }

    fn parsed(&self, path: &Path, record: &CatalogRecord) {
        tracing::debug!(
            path = %path.display(),
            id = %record.id,
            tools = record.tools.len(),
            "parsed catalog record"
        );
    }

    fn replaced(&self, id: &str, previous: &Path, path: &Path) {
        tracing::debug!(
            id,
            previous = %previous.display(),
            path = %path.display(),
            "catalog id reused; keeping the later file"
        );
    }

    fn unreadable_dir(&self, dir: &Path, error: &Error) {
        tracing::error!(dir = %dir.display(), "samples directory unreadable: {error}");
    }

    fn malformed(&self, path: &Path, error: &Error) {
        tracing::warn!(path = %path.display(), "using default metadata: {error}");
    }

    fn invalid_field(&self, path: &Path, field: &InvalidField) {
        tracing::warn!(
            path = %path.display(),
            field = field.field,
            "ignoring front matter field: {}", field.reason
        );
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn scanning(&self, dir: &Path) {
        (**self).scanning(dir)
    }

    fn discovered(&self, files: &[&Entry]) {
        (**self).discovered(files)
    }

    fn parsed(&self, path: &Path, record: &CatalogRecord) {
        (**self).parsed(path, record)
    }

    fn replaced(&self, id: &str, previous: &Path, path: &Path) {
        (**self).replaced(id, previous, path)
    }

    fn unreadable_dir(&self, dir: &Path, error: &Error) {
        (**self).unreadable_dir(dir, error)
    }

    fn malformed(&self, path: &Path, error: &Error) {
        (**self).malformed(path, error)
    }

    fn invalid_field(&self, path: &Path, field: &InvalidField) {
        (**self).invalid_field(path, field)
    }
}
