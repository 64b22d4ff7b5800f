use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use catalog::error::{Chainable, Result};
use catalog::format::{Format, Toml};
use catalog::{error, ExtractorConfig};

#[derive(Debug, Default)]
pub struct Config {
    /// Where the settings were read from, if anywhere.
    pub source: Option<PathBuf>,
    pub settings: Settings,
}

#[derive(Default, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Config {
    /// Reads `explicit` if given, else `CONFIG_FILE` in the samples directory
    /// if it exists, else uses the defaults.
    pub fn discover(samples: &Path, explicit: Option<&Path>) -> Result<Self> {
        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(samples.join(crate::CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let settings = match &source {
            Some(path) => Toml::read(path.as_path()).chain_with(|| error! {
                "failed to load configuration",
                "path" => path.display(),
            })?,
            None => Settings::default(),
        };

        Ok(Config { source, settings })
    }

    /// The output directory: `flag`, else the configured one, else `DATA_DIR`.
    pub fn output(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.settings.output.clone())
            .unwrap_or_else(|| PathBuf::from(crate::DATA_DIR))
    }
}
