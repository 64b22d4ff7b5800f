use std::fs;
use std::sync::Arc;
use std::path::{Path, PathBuf};
use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ErrorDetail, Result, Chainable};
use crate::fstree::Entry;

/// Something text can be read from: a string, a path, or a directory entry.
pub trait Source: Debug {
    fn read(self) -> Result<Arc<str>>;
}

impl Source for &str {
    fn read(self) -> Result<Arc<str>> {
        Ok(self.into())
    }
}

impl Source for String {
    fn read(self) -> Result<Arc<str>> {
        Ok(self.into())
    }
}

impl Source for &Path {
    fn read(self) -> Result<Arc<str>> {
        let bytes = fs::read(self).chain_with(|| error! {
            "failed to open file for reading",
            "file path" => self.display()
        })?;

        let string = String::from_utf8(bytes).chain_with(|| error! {
            "file is not valid UTF-8",
            "file path" => self.display()
        })?;

        Ok(string.into())
    }
}

impl Source for &Entry {
    fn read(self) -> Result<Arc<str>> {
        Source::read(&*self.path)
    }
}

/// Something text can be written to.
pub trait Sink: Debug {
    fn write_str(&self, string: &str) -> Result<()>;
}

impl Sink for &Path {
    fn write_str(&self, string: &str) -> Result<()> {
        fs::write(self, string).chain_with(|| error! {
            "failed to open/create file for writing",
            "file path" => self.display()
        })
    }
}

impl Sink for PathBuf {
    fn write_str(&self, string: &str) -> Result<()> {
        self.as_path().write_str(string)
    }
}

pub trait Format: Sized {
    /// The data format's error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`.
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;

    fn read<I: Source, T: DeserializeOwned>(input: I) -> Result<T> {
        let input = input.read()?;
        Ok(Self::from_str(&input)?)
    }
}

macro_rules! impl_format {
    ($name:ident : $func:expr, $E:ty) => (
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $func(s)
            }
        }
    );
}

impl_format!(Yaml: serde_yaml::from_str, serde_yaml::Error);
impl_format!(Toml: toml::from_str, toml::de::Error);
impl_format!(Json: serde_json::from_str, serde_json::Error);

impl Json {
    pub fn to_string_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).chain(error!("JSON serialization failed"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn formats_decode_strings() {
        let yaml: BTreeMap<String, String> = Yaml::read("a: b").unwrap();
        let toml: BTreeMap<String, String> = Toml::read("a = 'b'").unwrap();
        let json: BTreeMap<String, String> = Json::read(String::from(r#"{"a":"b"}"#)).unwrap();
        assert_eq!(yaml, toml);
        assert_eq!(toml, json);
    }

    #[test]
    fn missing_path_names_the_file() {
        let error = Path::new("/definitely/not/here.cs").read().unwrap_err();
        assert_eq!(error.message(), "failed to open file for reading");
        assert!(error.to_string().contains("/definitely/not/here.cs"));
    }

    #[test]
    fn non_utf8_files_fail_to_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.cs");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let error = path.as_path().read().unwrap_err();
        assert_eq!(error.message(), "file is not valid UTF-8");
    }

    #[test]
    fn sinks_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        path.write_str("{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
