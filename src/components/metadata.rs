use log::debug;
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;
use std::collections::HashMap;

use crate::config::MapperConfig;

/// Flat key/value metadata as exposed by the raster engine.
#[derive(Shrinkwrap, Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[shrinkwrap(mutable, unsafe_ignore_visibility)]
pub struct Metadata(HashMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// First non empty value among `keys`, in the order given.
    pub fn first_non_empty<'a, K: AsRef<str> + 'a>(
        &self,
        keys: impl IntoIterator<Item = &'a K>,
    ) -> Option<&str> {
        keys.into_iter()
            .filter_map(|key| self.0.get(key.as_ref()))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }
}

impl From<HashMap<String, String>> for Metadata {
    fn from(value: HashMap<String, String>) -> Self {
        Self(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Metadata {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Dataset metadata split by namespace.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NormalizedMetadata {
    /// Global attributes with the global prefix removed.
    pub global: Metadata,
    /// Georeferencing attributes with both prefixes removed.
    /// Only consumed when resolving geolocation.
    pub geo: Metadata,
}

/// Strip the global prefix from the dataset metadata keys.
///
/// Keys outside the global namespace are dropped. Keys in the geo namespace
/// go to [NormalizedMetadata::geo] only.
pub fn normalize<I, K, V>(raw: I, config: &MapperConfig) -> NormalizedMetadata
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    raw.into_iter()
        .fold(NormalizedMetadata::default(), |mut normalized, (key, value)| {
            let key = key.as_ref();
            match key.strip_prefix(config.global_prefix.as_str()) {
                Some(global_key) => match global_key.strip_prefix(config.geo_prefix.as_str()) {
                    Some(geo_key) => {
                        normalized.geo.insert(geo_key.into(), value.into());
                    }
                    None => {
                        normalized.global.insert(global_key.into(), value.into());
                    }
                },
                None => debug!("dropping metadata key {key:?} outside global namespace"),
            }
            normalized
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn strips_global_prefix_and_drops_foreign_keys() {
        let raw = [
            ("NC_GLOBAL#GDAL_title", "sst"),
            ("NC_GLOBAL#title", "other"),
            ("lat#units", "degrees_north"),
            ("NC_GLOBAL#GDAL_NANSAT_GCPX_000", "1|2"),
        ];
        let normalized = normalize(raw, &MapperConfig::default());

        assert_eq!(normalized.global.len(), 1);
        assert_eq!(normalized.global.get("title").map(String::as_str), Some("sst"));
        assert!(!normalized.global.contains_key("NANSAT_GCPX_000"));
        assert_eq!(normalized.geo.len(), 1);
        assert_eq!(normalized.geo.get("GCPX_000").map(String::as_str), Some("1|2"));
    }

    #[rstest]
    #[case("title")]
    #[case("NC_GLOBAL#history")]
    #[case("nc_global#gdal_title")]
    #[case("")]
    fn foreign_keys_never_leak(#[case] key: &str) {
        let normalized = normalize([(key, "value")], &MapperConfig::default());
        assert!(normalized.global.is_empty());
        assert!(normalized.geo.is_empty());
    }

    #[rstest]
    fn first_non_empty_follows_key_order() {
        let metadata: Metadata = [("b", "2"), ("a", ""), ("c", "3")].into_iter().collect();
        let keys = ["a", "b", "c"];
        assert_eq!(metadata.first_non_empty(&keys), Some("2"));
        assert_eq!(metadata.first_non_empty(&["x"]), None);
    }
}
