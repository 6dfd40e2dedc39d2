pub mod grid;

pub use grid::{Column, DataTable, Row};
