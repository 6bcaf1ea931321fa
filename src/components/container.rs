use log::info;

use crate::{
    components::{
        band::BandDescriptor,
        geolocation::{Gcp, GeoTransform, Geolocation, GeolocationArray},
        selector::ReferenceGrid,
        Metadata,
    },
    errors::Result,
};

/// Receiver of a mapped raster, e.g. a virtual dataset.
///
/// A sink exposes one geolocation model at a time: `set_gcps` must drop
/// any geotransform and `set_geo_transform` any GCPs.
pub trait RasterSink {
    fn set_metadata(&mut self, metadata: &Metadata) -> Result<()>;
    fn set_projection(&mut self, wkt: &str) -> Result<()>;
    fn set_gcps(&mut self, gcps: &[Gcp], wkt: &str) -> Result<()>;
    fn set_geolocation_array(&mut self, geolocation: &GeolocationArray) -> Result<()>;
    fn set_geo_transform(&mut self, transform: GeoTransform) -> Result<()>;
    fn create_bands(&mut self, bands: &[BandDescriptor]) -> Result<()>;
}

/// Bands and georeferencing resolved for one raster.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRaster {
    /// Normalized global metadata.
    pub metadata: Metadata,
    pub reference: ReferenceGrid,
    pub bands: Vec<BandDescriptor>,
    pub projection: String,
    pub geolocation: Geolocation,
}

impl MappedRaster {
    /// Hand everything to `sink`, with exactly one geolocation setter called.
    ///
    /// Meant to be called once per sink.
    pub fn install(&self, sink: &mut impl RasterSink) -> Result<()> {
        sink.set_metadata(&self.metadata)?;
        sink.set_projection(&self.projection)?;
        match &self.geolocation {
            Geolocation::Gcps {
                gcps, projection, ..
            } => sink.set_gcps(gcps, projection)?,
            Geolocation::GeolocationArray(geolocation) => {
                sink.set_geolocation_array(geolocation)?
            }
            Geolocation::GeoTransform { transform, .. } => sink.set_geo_transform(*transform)?,
        }
        sink.create_bands(&self.bands)?;
        info!(
            "installed {} bands on {} using {}",
            self.bands.len(),
            self.reference.path,
            self.geolocation.kind()
        );
        Ok(())
    }
}

/// Plain in memory [RasterSink].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RasterModel {
    pub metadata: Metadata,
    pub projection: String,
    pub gcps: Vec<Gcp>,
    pub gcp_projection: String,
    pub geolocation: Option<Metadata>,
    pub geo_transform: Option<GeoTransform>,
    pub bands: Vec<BandDescriptor>,
}

impl RasterSink for RasterModel {
    fn set_metadata(&mut self, metadata: &Metadata) -> Result<()> {
        self.metadata.extend(metadata.clone());
        Ok(())
    }

    fn set_projection(&mut self, wkt: &str) -> Result<()> {
        self.projection = wkt.to_string();
        Ok(())
    }

    fn set_gcps(&mut self, gcps: &[Gcp], wkt: &str) -> Result<()> {
        self.gcps.extend_from_slice(gcps);
        self.gcp_projection = wkt.to_string();
        self.geo_transform = None;
        Ok(())
    }

    fn set_geolocation_array(&mut self, geolocation: &GeolocationArray) -> Result<()> {
        self.geolocation = Some(geolocation.to_metadata());
        Ok(())
    }

    fn set_geo_transform(&mut self, transform: GeoTransform) -> Result<()> {
        self.geo_transform = Some(transform);
        self.gcps.clear();
        self.gcp_projection.clear();
        Ok(())
    }

    fn create_bands(&mut self, bands: &[BandDescriptor]) -> Result<()> {
        self.bands.extend_from_slice(bands);
        Ok(())
    }
}
