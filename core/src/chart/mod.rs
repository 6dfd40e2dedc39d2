pub mod dataset;
pub mod info;
pub mod model;

pub use dataset::{Dataset, SeriesSlot};
pub use info::InfoForm;
pub use model::ChartModel;
