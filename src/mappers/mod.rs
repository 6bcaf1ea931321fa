use std::fmt::Debug;

mod generic;
pub use generic::GenericMapper;

use crate::{
    components::{MappedRaster, Source},
    errors::Result,
};

pub trait Mapper: Debug {
    fn map<S: Source>(&self, source: &S) -> Result<MappedRaster>;
}
