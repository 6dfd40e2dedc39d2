pub mod controller;

pub use controller::{ChartController, Mode, ViewState};
