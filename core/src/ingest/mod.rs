pub mod upload;

pub use upload::{parse_photometry_csv, Upload};
