use crate::chart::dataset::{colors, Dataset, SeriesSlot};
use crate::prelude::DataPoint;
use serde::{Deserialize, Serialize};

/// Full chart state handed to the rendering collaborator: the five series,
/// title and axis strings, the y-axis direction, and the raw `jd` extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartModel {
    pub datasets: Vec<Dataset>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Magnitude axes render inverted (brighter is lower); the spectrum
    /// view is the one exception.
    pub reverse_y: bool,
    pub min_mjd: f64,
    pub max_mjd: f64,
}

impl ChartModel {
    pub fn new() -> Self {
        Self {
            datasets: vec![
                Dataset::new("Sample1", colors::BLUE, false),
                Dataset::new("Sample2", colors::RED, false),
                Dataset::new("Light Curve", colors::PURPLE, true),
                Dataset::new("Fourier", colors::BRIGHT, true).with_fine_points(),
                Dataset::new("Period Folding", colors::ORANGE, true),
            ],
            title: "Variable".to_string(),
            x_label: "Julian Date".to_string(),
            y_label: "Magnitude".to_string(),
            reverse_y: true,
            min_mjd: f64::INFINITY,
            max_mjd: f64::NEG_INFINITY,
        }
    }

    pub fn dataset(&self, slot: SeriesSlot) -> &Dataset {
        &self.datasets[slot.index()]
    }

    pub fn dataset_mut(&mut self, slot: SeriesSlot) -> &mut Dataset {
        &mut self.datasets[slot.index()]
    }

    pub fn set_data(&mut self, slot: SeriesSlot, data: Vec<DataPoint>) {
        self.datasets[slot.index()].data = data;
    }

    /// Hides every series except the given slots. All series are retained
    /// for fast switching back.
    pub fn show_only(&mut self, visible: &[SeriesSlot]) {
        for dataset in &mut self.datasets {
            dataset.hidden = true;
        }
        for slot in visible {
            self.datasets[slot.index()].hidden = false;
        }
    }

    pub fn visible_slots(&self) -> Vec<SeriesSlot> {
        SeriesSlot::ALL
            .iter()
            .copied()
            .filter(|slot| !self.dataset(*slot).hidden)
            .collect()
    }

    pub fn set_titles(&mut self, title: &str, x_label: &str, y_label: &str) {
        self.title = title.to_string();
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
    }
}

impl Default for ChartModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chart_shows_only_the_raw_series() {
        let chart = ChartModel::new();
        assert_eq!(
            chart.visible_slots(),
            vec![SeriesSlot::Src1, SeriesSlot::Src2]
        );
        assert!(chart.reverse_y);
    }

    #[test]
    fn show_only_is_exclusive() {
        let mut chart = ChartModel::new();
        chart.show_only(&[SeriesSlot::Spectrum]);
        assert_eq!(chart.visible_slots(), vec![SeriesSlot::Spectrum]);
        chart.show_only(&[SeriesSlot::Src1, SeriesSlot::Src2]);
        assert_eq!(
            chart.visible_slots(),
            vec![SeriesSlot::Src1, SeriesSlot::Src2]
        );
    }
}
