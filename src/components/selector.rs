use log::debug;

use crate::{
    components::{
        file::{Source, SubDataset},
        geolocation::NativeGeoreference,
    },
    config::MapperConfig,
    errors::{MapperError, Result},
};

/// Grid that fixes the extent of the mapped raster.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceGrid {
    pub path: String,
    /// (width, height)
    pub shape: (usize, usize),
    pub native: NativeGeoreference,
}

impl ReferenceGrid {
    fn from_sub_dataset(sub_dataset: &impl SubDataset) -> Result<Self> {
        Ok(Self {
            path: sub_dataset.path().to_string(),
            shape: sub_dataset.shape(),
            native: NativeGeoreference {
                projection: sub_dataset.projection(),
                gcps: sub_dataset.gcps()?,
                gcp_projection: sub_dataset.gcp_projection(),
                geo_transform: sub_dataset.geo_transform(),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Data,
    GeolocationX,
    GeolocationY,
}

impl Role {
    pub fn of(locator: &str, config: &MapperConfig) -> Self {
        let matches = |patterns: &[String]| {
            patterns
                .iter()
                .any(|pattern| locator.contains(pattern.as_str()))
        };
        if matches(&config.x_geolocation_patterns) {
            Role::GeolocationX
        } else if matches(&config.y_geolocation_patterns) {
            Role::GeolocationY
        } else {
            Role::Data
        }
    }
}

/// Sub datasets on the reference grid, by role.
#[derive(Debug)]
pub struct Selection<S: SubDataset> {
    pub reference: ReferenceGrid,
    pub data: Vec<S>,
    pub x_geolocation: Option<String>,
    pub y_geolocation: Option<String>,
}

impl<S: SubDataset> Selection<S> {
    /// Both coordinate grids, if both were found.
    pub fn geolocation_sources(&self) -> Option<(&str, &str)> {
        Some((
            self.x_geolocation.as_deref()?,
            self.y_geolocation.as_deref()?,
        ))
    }
}

/// Open the sub datasets of `source` in order.
///
/// The first one with both dimensions over 1 is the reference grid.
/// Sub datasets with the reference shape are kept, the rest are discarded.
pub fn select<Src: Source>(
    source: &Src,
    config: &MapperConfig,
) -> Result<Selection<Src::SubDataset>> {
    let mut reference: Option<ReferenceGrid> = None;
    let mut data = Vec::new();
    let mut x_geolocation: Option<String> = None;
    let mut y_geolocation: Option<String> = None;

    for locator in source.locators()? {
        let sub_dataset = source.open(&locator)?;
        let shape = sub_dataset.shape();

        if reference.is_none() && shape.0 > 1 && shape.1 > 1 {
            debug!("reference grid {locator} with shape {shape:?}");
            reference = Some(ReferenceGrid::from_sub_dataset(&sub_dataset)?);
        }
        if reference.as_ref().map(|grid| grid.shape) != Some(shape) {
            debug!("discarding {locator} with shape {shape:?}");
            continue;
        }

        let slot = match Role::of(&locator, config) {
            Role::Data => {
                data.push(sub_dataset);
                continue;
            }
            Role::GeolocationX => &mut x_geolocation,
            Role::GeolocationY => &mut y_geolocation,
        };
        if let Some(replaced) = slot.replace(locator) {
            debug!("geolocation from {replaced} replaced by a later sub dataset");
        }
    }

    let reference = reference.ok_or_else(|| MapperError::NoReferenceGrid {
        path: source.path().to_string(),
    })?;
    Ok(Selection {
        reference,
        data,
        x_geolocation,
        y_geolocation,
    })
}
