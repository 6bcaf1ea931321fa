//! In memory raster engine for tests.

use gdal::{errors::GdalError, raster::GdalDataType};

use crate::{
    components::{
        file::{Source, SubDataset},
        geolocation::{Gcp, GeoTransform},
        Metadata,
    },
    errors::{MapperError, Result},
};

#[derive(Debug, Clone, Default)]
pub struct MemorySubDataset {
    pub path: String,
    pub shape: (usize, usize),
    pub projection: String,
    pub gcps: Vec<Gcp>,
    pub gcp_projection: Option<String>,
    pub geo_transform: Option<GeoTransform>,
    pub bands: Vec<(GdalDataType, Metadata)>,
}

impl MemorySubDataset {
    pub fn new(path: &str, shape: (usize, usize)) -> Self {
        Self {
            path: path.into(),
            shape,
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: (usize, usize)) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_band(mut self, data_type: GdalDataType, metadata: &[(&str, &str)]) -> Self {
        self.bands
            .push((data_type, metadata.iter().copied().collect()));
        self
    }

    fn band(&self, index: usize) -> Result<&(GdalDataType, Metadata)> {
        index
            .checked_sub(1)
            .and_then(|index| self.bands.get(index))
            .ok_or_else(|| MapperError::BandOutOfRange {
                path: self.path.clone(),
                index,
                count: self.bands.len(),
            })
    }
}

impl SubDataset for MemorySubDataset {
    fn path(&self) -> &str {
        &self.path
    }
    fn shape(&self) -> (usize, usize) {
        self.shape
    }
    fn num_bands(&self) -> usize {
        self.bands.len()
    }
    fn projection(&self) -> String {
        self.projection.clone()
    }
    fn gcps(&self) -> Result<Vec<Gcp>> {
        Ok(self.gcps.clone())
    }
    fn gcp_projection(&self) -> Option<String> {
        self.gcp_projection.clone()
    }
    fn geo_transform(&self) -> Option<GeoTransform> {
        self.geo_transform
    }
    fn band_metadata(&self, index: usize) -> Result<Metadata> {
        Ok(self.band(index)?.1.clone())
    }
    fn band_data_type(&self, index: usize) -> Result<GdalDataType> {
        Ok(self.band(index)?.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub path: String,
    pub metadata: Metadata,
    /// Exposed as sub datasets unless `single`.
    pub sub_datasets: Vec<MemorySubDataset>,
    pub single: bool,
}

impl MemorySource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Source without sub datasets.
    pub fn single(grid: MemorySubDataset) -> Self {
        Self {
            path: grid.path.clone(),
            sub_datasets: vec![grid],
            single: true,
            ..Default::default()
        }
    }

    pub fn with_sub_dataset(mut self, sub_dataset: MemorySubDataset) -> Self {
        self.sub_datasets.push(sub_dataset);
        self
    }

    pub fn with_metadata(mut self, metadata: &[(&str, &str)]) -> Self {
        self.metadata = metadata.iter().copied().collect();
        self
    }
}

impl Source for MemorySource {
    type SubDataset = MemorySubDataset;

    fn path(&self) -> &str {
        &self.path
    }
    fn metadata(&self) -> Result<Metadata> {
        Ok(self.metadata.clone())
    }
    fn sub_datasets(&self) -> Result<Vec<String>> {
        if self.single {
            return Ok(Vec::new());
        }
        Ok(self
            .sub_datasets
            .iter()
            .map(|sub_dataset| sub_dataset.path.clone())
            .collect())
    }
    fn open(&self, locator: &str) -> Result<MemorySubDataset> {
        self.sub_datasets
            .iter()
            .find(|sub_dataset| sub_dataset.path == locator)
            .cloned()
            .ok_or_else(|| {
                GdalError::BadArgument(format!("no sub dataset {locator}")).into()
            })
    }
}
