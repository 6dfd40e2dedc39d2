use crate::chart::model::ChartModel;
use serde::{Deserialize, Serialize};

/// Editable chart-info fields kept in sync with the chart: title, the
/// comma-joined labels of the visible series, and both axis labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoForm {
    pub title: String,
    pub data_labels: String,
    pub x_axis: String,
    pub y_axis: String,
}

impl InfoForm {
    /// Exports the chart's current labels into form fields. Hidden and
    /// immutable-label series are left out of the label list.
    pub fn from_chart(chart: &ChartModel) -> Self {
        let data_labels = chart
            .datasets
            .iter()
            .filter(|dataset| !dataset.hidden && !dataset.immutable_label)
            .map(|dataset| dataset.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            title: chart.title.clone(),
            data_labels,
            x_axis: chart.x_label.clone(),
            y_axis: chart.y_label.clone(),
        }
    }

    /// Applies user overrides back onto the chart. Comma-split labels are
    /// assigned in order to the visible, non-immutable series; leftover
    /// series keep their labels.
    pub fn apply(&self, chart: &mut ChartModel) {
        chart.title = self.title.clone();

        let labels: Vec<&str> = self.data_labels.split(',').map(str::trim).collect();
        let mut next = 0;
        for dataset in &mut chart.datasets {
            if next >= labels.len() {
                break;
            }
            if !dataset.hidden && !dataset.immutable_label {
                dataset.label = labels[next].to_string();
                next += 1;
            }
        }

        chart.x_label = self.x_axis.clone();
        chart.y_label = self.y_axis.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::dataset::SeriesSlot;

    #[test]
    fn export_joins_visible_labels() {
        let chart = ChartModel::new();
        let form = InfoForm::from_chart(&chart);
        assert_eq!(form.title, "Variable");
        assert_eq!(form.data_labels, "Sample1, Sample2");
        assert_eq!(form.x_axis, "Julian Date");
    }

    #[test]
    fn apply_renames_visible_series_in_order() {
        let mut chart = ChartModel::new();
        let form = InfoForm {
            title: "My Star".to_string(),
            data_labels: "V1357 Cyg, Reference".to_string(),
            x_axis: "MJD".to_string(),
            y_axis: "Mag".to_string(),
        };
        form.apply(&mut chart);
        assert_eq!(chart.title, "My Star");
        assert_eq!(chart.dataset(SeriesSlot::Src1).label, "V1357 Cyg");
        assert_eq!(chart.dataset(SeriesSlot::Src2).label, "Reference");
        assert_eq!(chart.dataset(SeriesSlot::LightCurve).label, "Light Curve");
        assert_eq!(chart.x_label, "MJD");
    }

    #[test]
    fn apply_skips_hidden_series() {
        let mut chart = ChartModel::new();
        chart.show_only(&[SeriesSlot::FoldedCurve]);
        let form = InfoForm {
            title: "Folded".to_string(),
            data_labels: "Folded Series".to_string(),
            x_axis: "Julian Date".to_string(),
            y_axis: "Magnitude".to_string(),
        };
        form.apply(&mut chart);
        assert_eq!(chart.dataset(SeriesSlot::Src1).label, "Sample1");
        assert_eq!(chart.dataset(SeriesSlot::FoldedCurve).label, "Folded Series");
    }

    #[test]
    fn round_trip_preserves_labels() {
        let mut chart = ChartModel::new();
        let exported = InfoForm::from_chart(&chart);
        exported.apply(&mut chart);
        assert_eq!(InfoForm::from_chart(&chart), exported);
    }
}
