use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StoreError;
use crate::store::Document;

/// All collections of a store, in the on-disk layout.
pub type Collections = BTreeMap<String, Vec<Document>>;

/// Write collections to a JSON file. The file is replaced atomically
/// (temp file + rename) so a crash never leaves a half-written store.
pub fn save_collections(collections: &Collections, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(collections)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Load collections from a JSON file. A missing file is an empty store.
pub fn load_collections(path: &Path) -> Result<Collections, StoreError> {
    if !path.exists() {
        return Ok(Collections::new());
    }
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
