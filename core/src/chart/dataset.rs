use crate::prelude::DataPoint;
use serde::{Deserialize, Serialize};

/// Point colors shared with the GUI, as hex strings.
pub mod colors {
    pub const BLUE: &str = "#41a3d1";
    pub const RED: &str = "#cf4e49";
    pub const PURPLE: &str = "#8e44ad";
    pub const BRIGHT: &str = "#ced139";
    pub const ORANGE: &str = "#e67e22";
}

/// Fixed slots for the five series every chart instance carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesSlot {
    Src1,
    Src2,
    LightCurve,
    Spectrum,
    FoldedCurve,
}

impl SeriesSlot {
    pub const ALL: [SeriesSlot; 5] = [
        SeriesSlot::Src1,
        SeriesSlot::Src2,
        SeriesSlot::LightCurve,
        SeriesSlot::Spectrum,
        SeriesSlot::FoldedCurve,
    ];

    pub fn index(self) -> usize {
        match self {
            SeriesSlot::Src1 => 0,
            SeriesSlot::Src2 => 1,
            SeriesSlot::LightCurve => 2,
            SeriesSlot::Spectrum => 3,
            SeriesSlot::FoldedCurve => 4,
        }
    }
}

/// One named series: points, visibility, and point style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataPoint>,
    pub hidden: bool,
    pub color: String,
    pub point_radius: f32,
    pub point_hover_radius: f32,
    pub point_border_width: f32,
    pub immutable_label: bool,
}

impl Dataset {
    pub fn new(label: &str, color: &str, hidden: bool) -> Self {
        Self {
            label: label.to_string(),
            data: Vec::new(),
            hidden,
            color: color.to_string(),
            point_radius: 6.0,
            point_hover_radius: 8.0,
            point_border_width: 2.0,
            immutable_label: false,
        }
    }

    /// Smaller, borderless points used by the dense spectrum series.
    pub fn with_fine_points(mut self) -> Self {
        self.point_radius = 3.0;
        self.point_hover_radius = 6.0;
        self.point_border_width = 0.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_indices_cover_all_five_series() {
        for (position, slot) in SeriesSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), position);
        }
    }

    #[test]
    fn fine_points_shrink_the_markers() {
        let dataset = Dataset::new("Fourier", colors::BRIGHT, true).with_fine_points();
        assert_eq!(dataset.point_radius, 3.0);
        assert_eq!(dataset.point_border_width, 0.0);
    }
}
