pub mod builder;
pub mod folding;
pub mod light_curve;
pub mod spectrum;

pub use builder::{build_series, BuiltSeries, MjdExtent};
pub use folding::fold;
pub use light_curve::{light_curve, light_curve_label, TargetStar};
pub use spectrum::{spectrum, SPECTRUM_STEPS};
