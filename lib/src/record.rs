use derive_more::Deref;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Front matter exactly as a file declares it. Every field is optional;
/// [`RawFrontMatter::resolve()`] fills in the rest.
///
/// Fields decode independently: a value of the wrong shape is left out and
/// listed in `invalid`, and the other fields are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Mapping")]
pub struct RawFrontMatter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub downloads: Option<u64>,
    pub last_updated: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub created_date: Option<String>,
    pub env_vars: Option<Vec<String>>,
    pub invalid: Vec<InvalidField>,
}

/// A front matter field whose value couldn't be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    /// The key as written, e.g. `longDescription`.
    pub field: &'static str,
    pub reason: String,
}

/// Front matter with every field resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub id: String,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub tags: Vec<String>,
    pub status: String,
    pub downloads: u64,
    pub last_updated: String,
    pub version: String,
    pub author: String,
    pub license: String,
    pub created_date: String,
    pub env_vars: Vec<String>,
}

/// The per-file values the fallbacks are computed from.
#[derive(Debug, Clone, Copy)]
pub struct Defaults<'a> {
    /// File name without its extension.
    pub stem: &'a str,
    /// File name with the extension.
    pub file_name: &'a str,
    /// `YYYY-MM-DD`.
    pub today: &'a str,
    pub description: &'a str,
}

pub const DEFAULT_STATUS: &str = "stable";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_AUTHOR: &str = "Unknown";
pub const DEFAULT_LICENSE: &str = "MIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

/// One cataloged source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Deref)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[deref]
    #[serde(flatten)]
    pub front_matter: FrontMatter,
    pub tools: Vec<ToolDescriptor>,
    /// The file's complete, unmodified text.
    pub code: String,
    /// The text after the front matter, trimmed, with HTML entities decoded.
    pub display_code: String,
}

impl RawFrontMatter {
    /// Applies the fallbacks. `longDescription` and `createdDate` fall back to
    /// the *resolved* `description` and `lastUpdated`, so those resolve first.
    /// Empty strings count as missing.
    pub fn resolve(self, defaults: &Defaults<'_>) -> FrontMatter {
        fn or_else(value: Option<String>, f: impl FnOnce() -> String) -> String {
            value.filter(|v| !v.is_empty()).unwrap_or_else(f)
        }

        let description = or_else(self.description, || defaults.description.into());
        let last_updated = or_else(self.last_updated, || defaults.today.into());

        FrontMatter {
            id: or_else(self.id, || defaults.stem.into()),
            name: or_else(self.name, || defaults.file_name.into()),
            long_description: or_else(self.long_description, || description.clone()),
            description,
            tags: self.tags.unwrap_or_default(),
            status: or_else(self.status, || DEFAULT_STATUS.into()),
            downloads: self.downloads.unwrap_or(0),
            created_date: or_else(self.created_date, || last_updated.clone()),
            last_updated,
            version: or_else(self.version, || DEFAULT_VERSION.into()),
            author: or_else(self.author, || DEFAULT_AUTHOR.into()),
            license: or_else(self.license, || DEFAULT_LICENSE.into()),
            env_vars: self.env_vars.unwrap_or_default(),
        }
    }
}

/// The front matter mapping before any field is interpreted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Fields {
    id: Option<Value>,
    name: Option<Value>,
    description: Option<Value>,
    long_description: Option<Value>,
    tags: Option<Value>,
    status: Option<Value>,
    downloads: Option<Value>,
    last_updated: Option<Value>,
    version: Option<Value>,
    author: Option<Value>,
    license: Option<Value>,
    created_date: Option<Value>,
    env_vars: Option<Value>,
}

impl TryFrom<Mapping> for RawFrontMatter {
    type Error = serde_yaml::Error;

    fn try_from(mapping: Mapping) -> Result<Self, Self::Error> {
        serde_yaml::from_value::<Fields>(Value::Mapping(mapping)).map(RawFrontMatter::from)
    }
}

impl From<Fields> for RawFrontMatter {
    fn from(fields: Fields) -> Self {
        let mut invalid = vec![];
        let mut string = |field: &'static str, value: Option<Value>| {
            lenient::field(&mut invalid, field, value, lenient::string)
        };
        let id = string("id", fields.id);
        let name = string("name", fields.name);
        let description = string("description", fields.description);
        let long_description = string("longDescription", fields.long_description);
        let status = string("status", fields.status);
        let last_updated = string("lastUpdated", fields.last_updated);
        let version = string("version", fields.version);
        let author = string("author", fields.author);
        let license = string("license", fields.license);
        let created_date = string("createdDate", fields.created_date);

        RawFrontMatter {
            id,
            name,
            description,
            long_description,
            tags: lenient::field(&mut invalid, "tags", fields.tags, lenient::strings),
            status,
            downloads: lenient::field(&mut invalid, "downloads", fields.downloads, lenient::count),
            last_updated,
            version,
            author,
            license,
            created_date,
            env_vars: lenient::field(&mut invalid, "envVars", fields.env_vars, lenient::strings),
            invalid,
        }
    }
}

/// Readers that accept what hand-written YAML tends to contain: numbers
/// where strings are expected, a bare scalar where a list is expected.
mod lenient {
    use serde_yaml::Value;

    use super::InvalidField;

    type Read<T> = fn(Value) -> Result<Option<T>, String>;

    pub fn field<T>(
        invalid: &mut Vec<InvalidField>,
        field: &'static str,
        value: Option<Value>,
        read: Read<T>,
    ) -> Option<T> {
        match read(value?) {
            Ok(value) => value,
            Err(reason) => {
                invalid.push(InvalidField { field, reason });
                None
            }
        }
    }

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => scalar(tagged.value),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    pub fn string(value: Value) -> Result<Option<String>, String> {
        match value {
            Value::Null => Ok(None),
            value => scalar(value)
                .map(Some)
                .ok_or_else(|| "expected a string, number, or boolean".into()),
        }
    }

    pub fn strings(value: Value) -> Result<Option<Vec<String>>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Sequence(items) => Ok(Some(items.into_iter().filter_map(scalar).collect())),
            Value::Mapping(_) => Err("expected a list or a single value".into()),
            value => Ok(scalar(value).map(|v| vec![v])),
        }
    }

    pub fn count(value: Value) -> Result<Option<u64>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n.as_u64()
                .map(Some)
                .ok_or_else(|| format!("invalid download count `{n}`")),
            Value::String(s) => s.trim().parse()
                .map(Some)
                .map_err(|_| format!("invalid download count `{s}`")),
            _ => Err("expected a non-negative integer".into()),
        }
    }
}
