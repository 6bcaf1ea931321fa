use itertools::Itertools;
use log::info;

use crate::{
    components::{
        band::build_band_descriptors,
        geolocation,
        metadata::normalize,
        projection::resolve_projection,
        selector::select,
        MappedRaster, Source,
    },
    config::MapperConfig,
    errors::Result,
};

use super::Mapper;

/// Mapper for level 3/4 satellite and model products, netCDF or HDF
/// with `NC_GLOBAL#GDAL_` prefixed attributes by default.
#[derive(Debug, Default, Clone)]
pub struct GenericMapper {
    config: MapperConfig,
}

impl GenericMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }
}

impl Mapper for GenericMapper {
    fn map<S: Source>(&self, source: &S) -> Result<MappedRaster> {
        let config = &self.config;
        let normalized = normalize(source.metadata()?, config);
        let selection = select(source, config)?;

        let bands = selection
            .data
            .iter()
            .map(|sub_dataset| build_band_descriptors(sub_dataset, config))
            .process_results(|iter| iter.flatten().collect::<Vec<_>>())?;

        let native = &selection.reference.native;
        let projection = resolve_projection(&native.projection, &normalized.geo, config);
        let geolocation = geolocation::resolve(
            native,
            selection.geolocation_sources(),
            &normalized.geo,
            &projection,
            config,
        );

        let mapped = MappedRaster {
            metadata: normalized.global,
            reference: selection.reference,
            bands,
            projection,
            geolocation,
        };
        info!(
            "mapped {}: reference {} {:?}, {} bands, {}",
            source.path(),
            mapped.reference.path,
            mapped.reference.shape,
            mapped.bands.len(),
            mapped.geolocation.kind()
        );
        Ok(mapped)
    }
}
