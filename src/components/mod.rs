pub mod band;
pub mod container;
pub mod engines;
pub mod file;
pub mod geolocation;
pub mod metadata;
pub mod projection;
pub mod selector;

pub use band::{BandDescriptor, DestinationBand, SourceBand};
pub use container::{MappedRaster, RasterModel, RasterSink};
pub use file::{Source, SubDataset};
pub use geolocation::{Gcp, GeoTransform, Geolocation, GeolocationArray};
pub use metadata::{Metadata, NormalizedMetadata};
pub use selector::{ReferenceGrid, Selection};
