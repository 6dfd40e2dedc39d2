pub mod numeric;

pub use numeric::NumericHelper;
