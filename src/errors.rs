pub type Result<T> = std::result::Result<T, MapperError>;

#[derive(thiserror::Error, Debug)]
pub enum MapperError {
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error("No sub dataset of {path} has both dimensions larger than 1, reference grid is unknown")]
    NoReferenceGrid { path: String },
    #[error("Band {index} is out of range for {path} with {count} bands")]
    BandOutOfRange {
        path: String,
        index: usize,
        count: usize,
    },
}
