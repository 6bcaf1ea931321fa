use crate::{components::Metadata, config::MapperConfig};

/// Undo the sentinel encoding of a projection stored in flat metadata,
/// `|` back to `,` and `&` back to `"`.
pub fn repair(projection: &str) -> String {
    projection.replace('|', ",").replace('&', "\"")
}

/// Projection of the mapped raster.
///
/// Native projection of the reference grid if set, else the repaired
/// GCP projection from the geo metadata, else the configured default.
pub fn resolve_projection(native: &str, geo: &Metadata, config: &MapperConfig) -> String {
    if !native.is_empty() {
        return native.to_string();
    }
    match geo.first_non_empty(&[&config.gcp_projection_key]) {
        Some(encoded) => repair(encoded),
        None => config.default_projection.clone(),
    }
}
