use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::catalog::Catalog;
use crate::config::{ExtractorConfig, OnDuplicate};
use crate::error::Result;
use crate::format::Source;
use crate::frontmatter::{display_code, FrontMatterSpan};
use crate::fstree::{Entry, FsDir};
use crate::record::{CatalogRecord, Defaults};
use crate::report::{Reporter, TracingReporter};
use crate::tools::ToolScanner;

/// Turns a directory of sample sources into a [`Catalog`].
#[derive(derive_more::Debug)]
pub struct Extractor<R = TracingReporter> {
    config: ExtractorConfig,
    today: Arc<str>,
    #[debug(ignore)]
    reporter: R,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Extractor::with_reporter(config, TracingReporter)
    }
}

impl<R: Reporter> Extractor<R> {
    pub fn with_reporter(config: ExtractorConfig, reporter: R) -> Self {
        let today = config.build_date().format("%Y-%m-%d").to_string();
        Extractor { config, today: today.into(), reporter }
    }

    /// Catalogs every file in `dir` with the configured extension.
    ///
    /// A directory that can't be listed is reported and yields an empty
    /// catalog. A selected file that can't be read aborts the scan. Malformed
    /// front matter only costs that file its metadata.
    pub fn scan_directory<P: AsRef<Path>>(&self, dir: P) -> Result<Catalog> {
        let dir = dir.as_ref();
        self.reporter.scanning(dir);

        let listing = match FsDir::read(dir) {
            Ok(listing) => listing,
            Err(e) => {
                self.reporter.unreadable_dir(dir, &e);
                return Ok(Catalog::new());
            }
        };

        let files: Vec<&Entry> = listing.files_with_ext(&self.config.extension).collect();
        self.reporter.discovered(&files);

        let mut catalog = Catalog::new();
        let mut sources: FxHashMap<String, Arc<Path>> = FxHashMap::default();
        for entry in files {
            let text = entry.read()?;
            let record = self.parse_record(&text, &entry.path);
            self.reporter.parsed(&entry.path, &record);

            if let Some(previous) = sources.insert(record.id.clone(), entry.path.clone()) {
                if self.config.on_duplicate == OnDuplicate::Error {
                    return err! {
                        "duplicate catalog id",
                        "id" => record.id,
                        "first file" => previous.display(),
                        "second file" => entry.path.display(),
                    };
                }

                self.reporter.replaced(&record.id, &previous, &entry.path);
            }

            catalog.insert(record);
        }

        Ok(catalog)
    }

    /// Builds the record for one file's `text`. `path` only supplies the
    /// file name the `id` and `name` fallbacks are derived from.
    pub fn parse_record(&self, text: &str, path: &Path) -> CatalogRecord {
        let stem = path.file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        let file_name = format!("{stem}.{}", self.config.extension);
        let defaults = Defaults {
            stem: &stem,
            file_name: &file_name,
            today: &self.today,
            description: &self.config.fallback_description,
        };

        let span = FrontMatterSpan::detect(text, &self.config);
        let raw = span.decode(&self.config.comment).unwrap_or_else(|e| {
            self.reporter.malformed(path, &e);
            Default::default()
        });

        for field in &raw.invalid {
            self.reporter.invalid_field(path, field);
        }

        CatalogRecord {
            front_matter: raw.resolve(&defaults),
            tools: ToolScanner::new(&self.config).scan(text),
            code: text.to_string(),
            display_code: display_code(text, &self.config).into_owned(),
        }
    }
}
