use serde::{Deserialize, Serialize};

/// WKT of the WGS84 geographic reference system.
pub const WGS84_WKT: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,AUTHORITY["EPSG","7030"]],AUTHORITY["EPSG","6326"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AXIS["Latitude",NORTH],AXIS["Longitude",EAST],AUTHORITY["EPSG","4326"]]"#;

/// Metadata conventions understood by the mappers.
///
/// Every list is ordered by priority, first match wins.
/// Missing fields deserialize to the [Default] conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Prefix of the global attributes of interest.
    pub global_prefix: String,
    /// Prefix (after `global_prefix`) of the georeferencing attributes.
    pub geo_prefix: String,
    pub x_geolocation_patterns: Vec<String>,
    pub y_geolocation_patterns: Vec<String>,
    pub scale_keys: Vec<String>,
    pub offset_keys: Vec<String>,
    pub name_keys: Vec<String>,
    pub standard_name_key: String,
    /// Keys dropped from the destination metadata of every band.
    pub noise_keys: Vec<String>,
    /// Base names of the pixel, line, x and y GCP series.
    pub gcp_series: [String; 4],
    pub gcp_projection_key: String,
    pub geo_transform_key: String,
    pub default_projection: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            global_prefix: "NC_GLOBAL#GDAL_".into(),
            geo_prefix: "NANSAT_".into(),
            x_geolocation_patterns: strings(&["GEOLOCATION_X_DATASET", "longitude"]),
            y_geolocation_patterns: strings(&["GEOLOCATION_Y_DATASET", "latitude"]),
            scale_keys: strings(&["ScaleRatio", "scale", "scale_factor"]),
            offset_keys: strings(&["ScaleOffset", "offset", "add_offset"]),
            name_keys: strings(&["NETCDF_VARNAME", "dods_variable"]),
            standard_name_key: "standard_name".into(),
            noise_keys: strings(&[
                "NETCDF_VARNAME",
                "_FillValue",
                "_Unsigned",
                "ScaleRatio",
                "ScaleOffset",
                "dods_variable",
                "PixelFunctionType",
            ]),
            gcp_series: [
                "GCPPixel".into(),
                "GCPLine".into(),
                "GCPX".into(),
                "GCPY".into(),
            ],
            gcp_projection_key: "GCPProjection".into(),
            geo_transform_key: "GeoTransform".into(),
            default_projection: WGS84_WKT.into(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
