use geo::AffineTransform;
use itertools::izip;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;

use crate::{
    components::{projection::repair, Metadata},
    config::MapperConfig,
};

/// Ground control point, pixel/line to georeferenced x/y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gcp {
    pub pixel: f64,
    pub line: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Gcp {
    pub fn new(pixel: f64, line: f64, x: f64, y: f64) -> Self {
        Self {
            pixel,
            line,
            x,
            y,
            z: 0.,
        }
    }
}

/// GDAL ordered affine coefficients:
/// `[origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height]`.
#[derive(Shrinkwrap, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub const IDENTITY: GeoTransform = GeoTransform([0., 1., 0., 0., 0., 1.]);

    /// Parse `|` separated coefficients, surrounding parentheses allowed.
    pub fn parse(encoded: &str) -> Option<Self> {
        let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let cleaned = cleaned.trim_start_matches('(').trim_end_matches(')');
        let coefficients = cleaned
            .split('|')
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        <[f64; 6]>::try_from(coefficients).ok().map(GeoTransform)
    }
}

impl From<GeoTransform> for AffineTransform {
    fn from(value: GeoTransform) -> Self {
        let [xoff, a, b, yoff, d, e] = value.0;
        AffineTransform::new(a, b, xoff, d, e, yoff)
    }
}

/// Per pixel coordinate grids held by two sub datasets.
///
/// Mirrors the GDAL `GEOLOCATION` metadata domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationArray {
    pub x_dataset: String,
    pub y_dataset: String,
    pub x_band: usize,
    pub y_band: usize,
    pub srs: String,
    pub pixel_offset: f64,
    pub line_offset: f64,
    pub pixel_step: f64,
    pub line_step: f64,
}

impl GeolocationArray {
    pub fn new(x_dataset: String, y_dataset: String, srs: String) -> Self {
        Self {
            x_dataset,
            y_dataset,
            x_band: 1,
            y_band: 1,
            srs,
            pixel_offset: 0.,
            line_offset: 0.,
            pixel_step: 1.,
            line_step: 1.,
        }
    }

    /// Entries of the `GEOLOCATION` metadata domain.
    pub fn to_metadata(&self) -> Metadata {
        [
            ("X_DATASET", self.x_dataset.clone()),
            ("Y_DATASET", self.y_dataset.clone()),
            ("X_BAND", self.x_band.to_string()),
            ("Y_BAND", self.y_band.to_string()),
            ("SRS", self.srs.clone()),
            ("PIXEL_OFFSET", self.pixel_offset.to_string()),
            ("LINE_OFFSET", self.line_offset.to_string()),
            ("PIXEL_STEP", self.pixel_step.to_string()),
            ("LINE_STEP", self.line_step.to_string()),
        ]
        .into_iter()
        .collect()
    }
}

/// Georeferencing the reference grid carries on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeGeoreference {
    pub projection: String,
    pub gcps: Vec<Gcp>,
    pub gcp_projection: Option<String>,
    pub geo_transform: Option<GeoTransform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GcpOrigin {
    Native,
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoTransformOrigin {
    Native,
    Metadata,
    Default,
}

/// The single active pixel to geographic model of a raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geolocation {
    Gcps {
        gcps: Vec<Gcp>,
        projection: String,
        origin: GcpOrigin,
    },
    GeolocationArray(GeolocationArray),
    GeoTransform {
        transform: GeoTransform,
        origin: GeoTransformOrigin,
    },
}

impl Geolocation {
    pub fn kind(&self) -> &'static str {
        match self {
            Geolocation::Gcps { .. } => "gcps",
            Geolocation::GeolocationArray(_) => "geolocation array",
            Geolocation::GeoTransform { .. } => "geotransform",
        }
    }
}

/// Pick the geolocation model, first applicable wins:
/// native GCPs, geolocation arrays, GCPs from metadata, geotransform.
///
/// `projection` is the already resolved raster projection, used where no
/// more specific one is available.
pub fn resolve(
    native: &NativeGeoreference,
    geolocation_sources: Option<(&str, &str)>,
    geo: &Metadata,
    projection: &str,
    config: &MapperConfig,
) -> Geolocation {
    if !native.gcps.is_empty() {
        let projection = native
            .gcp_projection
            .as_deref()
            .filter(|gcp_projection| !gcp_projection.is_empty())
            .unwrap_or(projection);
        return Geolocation::Gcps {
            gcps: native.gcps.clone(),
            projection: projection.to_string(),
            origin: GcpOrigin::Native,
        };
    }

    if let Some((x_dataset, y_dataset)) = geolocation_sources {
        return Geolocation::GeolocationArray(GeolocationArray::new(
            x_dataset.to_string(),
            y_dataset.to_string(),
            projection.to_string(),
        ));
    }

    let gcps = parse_gcps(geo, config);
    if !gcps.is_empty() {
        let projection = match geo.first_non_empty(&[&config.gcp_projection_key]) {
            Some(encoded) => repair(encoded),
            None => projection.to_string(),
        };
        return Geolocation::Gcps {
            gcps,
            projection,
            origin: GcpOrigin::Metadata,
        };
    }

    if let Some(transform) = native.geo_transform {
        return Geolocation::GeoTransform {
            transform,
            origin: GeoTransformOrigin::Native,
        };
    }
    match geo.get(&config.geo_transform_key) {
        Some(encoded) => match GeoTransform::parse(encoded) {
            Some(transform) => Geolocation::GeoTransform {
                transform,
                origin: GeoTransformOrigin::Metadata,
            },
            None => {
                warn!("malformed geotransform {encoded:?}, using identity");
                Geolocation::GeoTransform {
                    transform: GeoTransform::IDENTITY,
                    origin: GeoTransformOrigin::Default,
                }
            }
        },
        None => Geolocation::GeoTransform {
            transform: GeoTransform::IDENTITY,
            origin: GeoTransformOrigin::Default,
        },
    }
}

/// GCPs encoded in `{series}_{000}` pieces of the geo metadata.
///
/// Any inconsistency in the four series yields no GCPs.
pub fn parse_gcps(geo: &Metadata, config: &MapperConfig) -> Vec<Gcp> {
    let [pixel, line, x, y] = &config.gcp_series;
    let series = (
        parse_series(geo, pixel),
        parse_series(geo, line),
        parse_series(geo, x),
        parse_series(geo, y),
    );
    let (Some(pixel), Some(line), Some(x), Some(y)) = series else {
        return Vec::new();
    };
    if pixel.len() != line.len() || pixel.len() != x.len() || pixel.len() != y.len() {
        warn!(
            "GCP series lengths differ (pixel {}, line {}, x {}, y {}), ignoring GCPs",
            pixel.len(),
            line.len(),
            x.len(),
            y.len()
        );
        return Vec::new();
    }
    izip!(pixel, line, x, y)
        .map(|(pixel, line, x, y)| Gcp::new(pixel, line, x, y))
        .collect()
}

/// Values of one series, `None` if its pieces have gaps or a value
/// is not a number.
fn parse_series(geo: &Metadata, base: &str) -> Option<Vec<f64>> {
    let pieces: Vec<&str> = (0..)
        .map_while(move |index| geo.get(&format!("{base}_{index:03}")))
        .map(String::as_str)
        .collect();

    let indexed = geo.keys().filter(|key| is_series_piece(key, base)).count();
    if indexed != pieces.len() {
        warn!("{base} has {indexed} pieces but only {} are contiguous", pieces.len());
        return None;
    }

    let joined: String = pieces
        .concat()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let values = joined
        .split('|')
        .filter(|token| !token.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>();
    match values {
        Ok(values) => {
            debug!("{base}: {} values from {} pieces", values.len(), pieces.len());
            Some(values)
        }
        Err(err) => {
            warn!("{base} holds a non numeric value: {err}");
            None
        }
    }
}

fn is_series_piece(key: &str, base: &str) -> bool {
    key.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|index| index.len() >= 3 && index.chars().all(|c| c.is_ascii_digit()))
}
