use gdal::raster::GdalDataType;
use log::debug;

use crate::{
    components::{file::SubDataset, Metadata},
    config::MapperConfig,
    errors::Result,
};

/// Where the pixels of a band are read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBand {
    pub location: String,
    /// 1-based, relative to `location`.
    pub band_index: usize,
    pub data_type: GdalDataType,
    pub scale_ratio: Option<String>,
    pub scale_offset: Option<String>,
}

/// What a band is, as exposed on the mapped raster.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationBand {
    pub name: Option<String>,
    /// Well known variable, from the CF standard name.
    pub physical_quantity: Option<String>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandDescriptor {
    pub src: SourceBand,
    pub dst: DestinationBand,
}

impl BandDescriptor {
    pub fn new(
        location: &str,
        band_index: usize,
        data_type: GdalDataType,
        metadata: Metadata,
        config: &MapperConfig,
    ) -> Self {
        let owned = |value: Option<&str>| value.map(str::to_string);
        let src = SourceBand {
            location: location.to_string(),
            band_index,
            data_type,
            scale_ratio: owned(metadata.first_non_empty(&config.scale_keys)),
            scale_offset: owned(metadata.first_non_empty(&config.offset_keys)),
        };

        let name = owned(metadata.first_non_empty(&config.name_keys));
        let physical_quantity = owned(metadata.first_non_empty(&[&config.standard_name_key]));
        let mut metadata = metadata;
        metadata.retain(|key, _| !config.noise_keys.contains(key));

        Self {
            src,
            dst: DestinationBand {
                name,
                physical_quantity,
                metadata,
            },
        }
    }
}

/// One descriptor per band of `sub_dataset`.
pub fn build_band_descriptors(
    sub_dataset: &impl SubDataset,
    config: &MapperConfig,
) -> Result<Vec<BandDescriptor>> {
    (1..=sub_dataset.num_bands())
        .map(|band_index| {
            let metadata = sub_dataset.band_metadata(band_index)?;
            let data_type = sub_dataset.band_data_type(band_index)?;
            let descriptor =
                BandDescriptor::new(sub_dataset.path(), band_index, data_type, metadata, config);
            debug!(
                "band {band_index} of {} named {:?}",
                sub_dataset.path(),
                descriptor.dst.name
            );
            Ok(descriptor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemorySubDataset;
    use rstest::rstest;

    fn descriptor(entries: &[(&str, &str)]) -> BandDescriptor {
        BandDescriptor::new(
            "NETCDF:\"sst.nc\":sst",
            1,
            GdalDataType::Int16,
            entries.iter().copied().collect(),
            &MapperConfig::default(),
        )
    }

    #[rstest]
    #[case::first_alias_wins(&[("ScaleRatio", "2.0"), ("scale_factor", "3.0")], Some("2.0"))]
    #[case::second_alias(&[("scale", "4.0"), ("scale_factor", "3.0")], Some("4.0"))]
    #[case::empty_alias_skipped(&[("ScaleRatio", ""), ("scale_factor", "3.0")], Some("3.0"))]
    #[case::absent(&[("units", "K")], None)]
    #[case::only_empty(&[("ScaleRatio", "")], None)]
    fn scale_ratio_fallback(#[case] entries: &[(&str, &str)], #[case] expected: Option<&str>) {
        assert_eq!(descriptor(entries).src.scale_ratio.as_deref(), expected);
    }

    #[rstest]
    #[case(&[("ScaleOffset", "1"), ("add_offset", "2")], Some("1"))]
    #[case(&[("offset", "3"), ("add_offset", "2")], Some("3"))]
    #[case(&[("add_offset", "273.15")], Some("273.15"))]
    #[case(&[], None)]
    fn scale_offset_fallback(#[case] entries: &[(&str, &str)], #[case] expected: Option<&str>) {
        assert_eq!(descriptor(entries).src.scale_offset.as_deref(), expected);
    }

    #[rstest]
    #[case(&[("NETCDF_VARNAME", "sst"), ("dods_variable", "analysed_sst")], Some("sst"))]
    #[case(&[("NETCDF_VARNAME", ""), ("dods_variable", "analysed_sst")], Some("analysed_sst"))]
    #[case(&[("long_name", "sea surface temperature")], None)]
    fn name_fallback(#[case] entries: &[(&str, &str)], #[case] expected: Option<&str>) {
        assert_eq!(descriptor(entries).dst.name.as_deref(), expected);
    }

    #[rstest]
    fn physical_quantity_from_standard_name() {
        let with = descriptor(&[("standard_name", "sea_surface_temperature")]);
        assert_eq!(
            with.dst.physical_quantity.as_deref(),
            Some("sea_surface_temperature")
        );
        assert_eq!(descriptor(&[]).dst.physical_quantity, None);
    }

    #[rstest]
    fn noise_keys_are_stripped() {
        let band = descriptor(&[
            ("NETCDF_VARNAME", "sst"),
            ("_FillValue", "-32768"),
            ("_Unsigned", "false"),
            ("ScaleRatio", "0.01"),
            ("ScaleOffset", "273.15"),
            ("dods_variable", "sst"),
            ("PixelFunctionType", "ComplexToPower"),
            ("units", "kelvin"),
            ("standard_name", "sea_surface_temperature"),
        ]);
        let mut keys: Vec<&str> = band.dst.metadata.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["standard_name", "units"]);
        assert_eq!(band.src.scale_ratio.as_deref(), Some("0.01"));
        assert_eq!(band.dst.name.as_deref(), Some("sst"));
    }

    #[rstest]
    fn one_descriptor_per_band_with_local_indexes() {
        let sub_dataset = MemorySubDataset::new("HDF5:\"f.h5\"://chl", (4, 3))
            .with_band(GdalDataType::Float32, &[("NETCDF_VARNAME", "chl")])
            .with_band(GdalDataType::UInt16, &[("NETCDF_VARNAME", "flags")]);
        let descriptors = build_band_descriptors(&sub_dataset, &MapperConfig::default()).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].src.band_index, 1);
        assert_eq!(descriptors[1].src.band_index, 2);
        assert_eq!(descriptors[1].src.location, "HDF5:\"f.h5\"://chl");
        assert_eq!(descriptors[1].src.data_type, GdalDataType::UInt16);
        assert_eq!(descriptors[1].dst.name.as_deref(), Some("flags"));
    }
}
