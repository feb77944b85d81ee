use super::types::ExportDescriptor;
use crate::storage::types::StorageKey;

pub const KEY_EXTENSION: &str = ".png";

/// Derives the storage key for an export: the text after the last `/` of the
/// transient URL, plus `.png`.
///
/// Anything after that slash (a query string included) is kept verbatim. A URL with
/// no `/` at all contributes the whole string.
pub fn derive_key(descriptor: &ExportDescriptor) -> StorageKey {
    let url = descriptor.transient_url.as_str();
    let last_segment = url.rsplit_once('/').map_or(url, |(_, last)| last);

    StorageKey(format!("{}{}", last_segment, KEY_EXTENSION))
}
