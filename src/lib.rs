pub mod components;
pub mod config;
mod errors;
pub mod mappers;

#[cfg(test)]
mod test_utils;

pub use components::{
    engines::gdal_engine::{GdalSource, GdalSubDataset},
    BandDescriptor, Gcp, GeoTransform, Geolocation, GeolocationArray, MappedRaster, Metadata,
    RasterModel, RasterSink,
};
pub use config::MapperConfig;
pub use errors::{MapperError, Result};
pub use mappers::{GenericMapper, Mapper};

use std::path::Path;

/// Open `path` with gdal and map it with the default conventions.
pub fn open<P: AsRef<Path>>(path: P) -> Result<MappedRaster> {
    let source = GdalSource::open(path)?;
    GenericMapper::default().map(&source)
}
