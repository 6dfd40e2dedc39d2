use photocore::chart::{ChartModel, Dataset};
use photocore::table::Column;
use photocore::view::Mode;
use serde::{Deserialize, Serialize};

/// Wire payload served to the GUI: everything the chart collaborator needs
/// to redraw, datasets parallel to the five series slots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChartPayload {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub reverse_y: bool,
    pub datasets: Vec<Dataset>,
}

impl From<&ChartModel> for ChartPayload {
    fn from(chart: &ChartModel) -> Self {
        Self {
            title: chart.title.clone(),
            x_label: chart.x_label.clone(),
            y_label: chart.y_label.clone(),
            reverse_y: chart.reverse_y,
            datasets: chart.datasets.clone(),
        }
    }
}

/// View-parameter change accepted by the `/view` route. Absent fields
/// leave the stored parameter untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewRequest {
    pub mode: Option<Mode>,
    pub target: Option<String>,
    pub reference_mag: Option<f64>,
    pub period: Option<f64>,
    pub spectrum_start: Option<f64>,
    pub spectrum_stop: Option<f64>,
}

/// Body of the `/upload` route: the raw text of a user-selected file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub file_name: String,
    pub contents: String,
}

/// One cell edit, mirroring the grid widget's change callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellEdit {
    pub row: usize,
    pub column: Column,
    pub value: Option<f64>,
}

/// Row addressed by index, used by the row-removal route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowIndex {
    pub row: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_mirrors_the_chart_model() {
        let chart = ChartModel::new();
        let payload = ChartPayload::from(&chart);
        assert_eq!(payload.title, "Variable");
        assert_eq!(payload.datasets.len(), 5);
        assert!(payload.reverse_y);
    }

    #[test]
    fn view_request_tolerates_sparse_json() {
        let request: ViewRequest = serde_json::from_str(r#"{"mode": "pf", "period": 2.0}"#).unwrap();
        assert_eq!(request.mode, Some(Mode::Pf));
        assert_eq!(request.period, Some(2.0));
        assert_eq!(request.target, None);
    }
}
