use gdal::raster::GdalDataType;
use std::fmt::Debug;

use crate::{
    components::{
        geolocation::{Gcp, GeoTransform},
        Metadata,
    },
    errors::Result,
};

/// A raster source that may hold several sub datasets.
pub trait Source: Debug {
    type SubDataset: SubDataset;

    fn path(&self) -> &str;
    /// Top level dataset metadata, default domain.
    fn metadata(&self) -> Result<Metadata>;
    /// Sub dataset locators, in the engine's order.
    /// Empty when the source is a single grid.
    fn sub_datasets(&self) -> Result<Vec<String>>;
    fn open(&self, locator: &str) -> Result<Self::SubDataset>;

    /// Sub dataset locators, falling back to the source itself.
    fn locators(&self) -> Result<Vec<String>> {
        let locators = self.sub_datasets()?;
        if locators.is_empty() {
            Ok(vec![self.path().to_string()])
        } else {
            Ok(locators)
        }
    }
}

/// One grid of a [Source].
///
/// Band indexes are 1-based.
pub trait SubDataset: Debug {
    fn path(&self) -> &str;
    /// (width, height)
    fn shape(&self) -> (usize, usize);
    fn num_bands(&self) -> usize;
    /// Native projection WKT, empty if unset.
    fn projection(&self) -> String;
    fn gcps(&self) -> Result<Vec<Gcp>>;
    fn gcp_projection(&self) -> Option<String>;
    fn geo_transform(&self) -> Option<GeoTransform>;
    fn band_metadata(&self, index: usize) -> Result<Metadata>;
    fn band_data_type(&self, index: usize) -> Result<GdalDataType>;
}
