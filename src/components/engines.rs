use std::path::Path;

use crate::{
    components::{
        file::{Source, SubDataset},
        geolocation::{Gcp, GeoTransform},
        Metadata,
    },
    errors::{MapperError, Result},
};

/// Implementations for gdal
pub mod gdal_engine {
    use super::*;
    use gdal::{
        raster::GdalDataType, Dataset as GdalDataset, Metadata as GdalMetadata,
        MetadataEntry as GdalMetadataEntry,
    };

    fn filter_metadata_gdal(metadata: &impl GdalMetadata) -> Metadata {
        GdalMetadata::metadata(metadata)
            .filter_map(|GdalMetadataEntry { domain, key, value }| {
                domain.is_empty().then_some((key, value))
            })
            .collect()
    }

    /// `SUBDATASET_n_NAME` values of the `SUBDATASETS` domain, in order.
    fn sub_dataset_locators(entries: impl Iterator<Item = GdalMetadataEntry>) -> Vec<String> {
        entries
            .filter_map(|GdalMetadataEntry { domain, key, value }| {
                (domain == "SUBDATASETS" && key.ends_with("_NAME")).then_some(value)
            })
            .collect()
    }

    #[derive(Debug)]
    pub struct GdalSource {
        path: String,
        dataset: GdalDataset,
    }

    impl GdalSource {
        pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            Ok(GdalSource {
                path: path.as_ref().to_string_lossy().into_owned(),
                dataset: GdalDataset::open(&path)?,
            })
        }
    }

    impl Source for GdalSource {
        type SubDataset = GdalSubDataset;

        fn path(&self) -> &str {
            &self.path
        }
        fn metadata(&self) -> Result<Metadata> {
            Ok(filter_metadata_gdal(&self.dataset))
        }
        fn sub_datasets(&self) -> Result<Vec<String>> {
            Ok(sub_dataset_locators(GdalMetadata::metadata(
                &self.dataset,
            )))
        }
        fn open(&self, locator: &str) -> Result<GdalSubDataset> {
            GdalSubDataset::open(locator)
        }
    }

    #[derive(Debug)]
    pub struct GdalSubDataset {
        path: String,
        dataset: GdalDataset,
    }

    impl GdalSubDataset {
        pub fn open(locator: &str) -> Result<Self> {
            Ok(GdalSubDataset {
                path: locator.to_string(),
                dataset: GdalDataset::open(locator)?,
            })
        }

        fn checked_band(&self, index: usize) -> Result<gdal::raster::RasterBand<'_>> {
            let count = self.dataset.raster_count();
            if index == 0 || index > count {
                return Err(MapperError::BandOutOfRange {
                    path: self.path.clone(),
                    index,
                    count,
                });
            }
            Ok(self.dataset.rasterband(index)?)
        }
    }

    impl SubDataset for GdalSubDataset {
        fn path(&self) -> &str {
            &self.path
        }
        fn shape(&self) -> (usize, usize) {
            self.dataset.raster_size()
        }
        fn num_bands(&self) -> usize {
            self.dataset.raster_count()
        }
        fn projection(&self) -> String {
            self.dataset.projection()
        }
        fn gcps(&self) -> Result<Vec<Gcp>> {
            let c_dataset = self.dataset.c_dataset();
            let count = unsafe { gdal_sys::GDALGetGCPCount(c_dataset) };
            if count <= 0 {
                return Ok(Vec::new());
            }
            let c_gcps = unsafe { gdal_sys::GDALGetGCPs(c_dataset) };
            if c_gcps.is_null() {
                return Ok(Vec::new());
            }
            let c_gcps = unsafe { std::slice::from_raw_parts(c_gcps, count as usize) };
            Ok(c_gcps
                .iter()
                .map(|gcp| Gcp {
                    pixel: gcp.dfGCPPixel,
                    line: gcp.dfGCPLine,
                    x: gcp.dfGCPX,
                    y: gcp.dfGCPY,
                    z: gcp.dfGCPZ,
                })
                .collect())
        }
        fn gcp_projection(&self) -> Option<String> {
            self.dataset.gcp_projection()
        }
        fn geo_transform(&self) -> Option<GeoTransform> {
            self.dataset.geo_transform().ok().map(GeoTransform)
        }
        fn band_metadata(&self, index: usize) -> Result<Metadata> {
            Ok(filter_metadata_gdal(&self.checked_band(index)?))
        }
        fn band_data_type(&self, index: usize) -> Result<GdalDataType> {
            Ok(self.checked_band(index)?.band_type())
        }
    }

}
