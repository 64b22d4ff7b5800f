use std::fs;
use std::path::{Path, PathBuf};

use catalog::error::{Chainable, Result};
use catalog::format::{Json, Sink};
use catalog::{error, Catalog};

/// The catalog as an object keyed by id.
pub const SERVERS_FILE: &str = "servers.json";

/// The catalog as a list, for pagination.
pub const SERVERS_ARRAY_FILE: &str = "serversArray.json";

/// Writes both data files into `output`, creating it if needed. Returns the
/// paths written.
pub fn write_catalog(output: &Path, catalog: &Catalog) -> Result<[PathBuf; 2]> {
    fs::create_dir_all(output).chain_with(|| error! {
        "failed to create output directory",
        "path" => output.display(),
    })?;

    let servers = output.join(SERVERS_FILE);
    servers.write_str(&Json::to_string_pretty(catalog)?)?;

    let servers_array = output.join(SERVERS_ARRAY_FILE);
    servers_array.write_str(&Json::to_string_pretty(&catalog.to_list())?)?;

    Ok([servers, servers_array])
}

#[cfg(test)]
mod tests {
    use catalog::{ExtractorConfig, Extractor, Silent};

    use super::*;

    #[test]
    fn writes_map_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = Extractor::with_reporter(ExtractorConfig::default(), Silent);
        let catalog: Catalog = [
            extractor.parse_record("// ---\n// id: zulu\n// ---\n", Path::new("z.cs")),
            extractor.parse_record("class A {}", Path::new("a.cs")),
        ].into_iter().collect();

        let output = dir.path().join("nested").join("_data");
        let [servers, array] = write_catalog(&output, &catalog).unwrap();

        let map: serde_json::Value = serde_json::from_str(&fs::read_to_string(servers).unwrap()).unwrap();
        assert_eq!(map["zulu"]["name"], "z.cs");
        assert_eq!(map["a"]["displayCode"], "class A {}");

        let list: serde_json::Value = serde_json::from_str(&fs::read_to_string(array).unwrap()).unwrap();
        let ids: Vec<_> = list.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["zulu", "a"]);
    }
}
