use crate::session::config::SessionConfig;
use photocore::ingest::parse_photometry_csv;
use photocore::prelude::ChartResult;
use photocore::table::{Column, DataTable, Row};
use photocore::transform::TargetStar;
use photocore::view::{ChartController, Mode, ViewState};

/// Summary of one finished session, printed by the offline driver.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub title: String,
    pub state: ViewState,
    pub visible_labels: Vec<String>,
    pub visible_points: usize,
    pub recomputes: usize,
    pub rejected: usize,
}

/// Owns the table and chart controller, and replays sessions onto them.
pub struct Runner {
    config: SessionConfig,
    table: DataTable,
    controller: ChartController,
}

impl Runner {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            table: DataTable::new(),
            controller: ChartController::new(),
        }
    }

    pub fn controller(&self) -> &ChartController {
        &self.controller
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Replaces the whole grid and rebuilds the chart from it.
    pub fn load_rows(&mut self, rows: Vec<Row>) {
        self.table.replace_rows(rows);
        self.controller.table_changed(&self.table);
    }

    pub fn insert_row(&mut self) -> usize {
        let index = self.table.insert_row();
        self.controller.table_changed(&self.table);
        index
    }

    pub fn set_cell(&mut self, row: usize, column: Column, value: Option<f64>) -> bool {
        let changed = self.table.set_cell(row, column, value);
        if changed {
            self.controller.table_changed(&self.table);
        }
        changed
    }

    pub fn remove_row(&mut self, row: usize) -> bool {
        let changed = self.table.remove_row(row);
        if changed {
            self.controller.table_changed(&self.table);
        }
        changed
    }

    /// Parses an uploaded photometry CSV and loads it into the table.
    /// Returns the number of rows kept.
    pub fn ingest_upload(&mut self, file_name: &str, contents: &str) -> ChartResult<usize> {
        let upload = parse_photometry_csv(file_name, contents)?;
        self.controller.apply_upload(&upload, &mut self.table);
        Ok(self.table.len())
    }

    /// Replays the configured session onto the controller: parameters
    /// first, then the mode switch that derives the active series.
    pub fn apply_session(&mut self) {
        self.controller
            .set_spectrum_bounds(self.config.spectrum_start, self.config.spectrum_stop);
        self.controller.set_period(self.config.period);
        self.controller.set_reference_mag(self.config.reference_mag);
        self.controller.set_target(self.config.target);
        self.controller.set_mode(self.config.mode);

        if let Some(title) = self.config.title.clone() {
            let mut form = self.controller.info_form();
            form.title = title;
            self.controller.apply_info(&form);
        }
    }

    pub fn set_target(&mut self, target: Option<TargetStar>) {
        self.controller.set_target(target);
    }

    pub fn set_reference_mag(&mut self, reference_mag: f64) {
        self.controller.set_reference_mag(reference_mag);
    }

    pub fn set_period(&mut self, period: f64) {
        self.controller.set_period(period);
    }

    pub fn set_spectrum_bounds(&mut self, start: f64, stop: f64) {
        self.controller.set_spectrum_bounds(start, stop);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
    }

    pub fn info_form(&self) -> photocore::chart::InfoForm {
        self.controller.info_form()
    }

    pub fn apply_info(&mut self, form: &photocore::chart::InfoForm) {
        self.controller.apply_info(form);
    }

    pub fn summary(&self) -> SessionSummary {
        let chart = self.controller.chart();
        let visible: Vec<&photocore::chart::Dataset> = chart
            .visible_slots()
            .into_iter()
            .map(|slot| chart.dataset(slot))
            .collect();
        let (recomputes, rejected) = self.controller.metrics();

        SessionSummary {
            title: chart.title.clone(),
            state: self.controller.state(),
            visible_labels: visible.iter().map(|dataset| dataset.label.clone()).collect(),
            visible_points: visible.iter().map(|dataset| dataset.data.len()).sum(),
            recomputes,
            rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::demo::{build_demo_rows, DemoConfig};

    #[test]
    fn runner_replays_a_folding_session() {
        let config = SessionConfig {
            mode: Mode::Pf,
            target: Some(TargetStar::Src1),
            period: 3.0,
            ..Default::default()
        };
        let mut runner = Runner::new(config);
        runner.load_rows(build_demo_rows(&DemoConfig::default()));
        runner.apply_session();

        let summary = runner.summary();
        assert_eq!(summary.state, ViewState::FoldedCurve);
        assert_eq!(summary.title, "Period Folding");
        // 14 demo rows, folded to two points each.
        assert_eq!(summary.visible_points, 28);
    }

    #[test]
    fn runner_without_target_stays_on_raw_scatter() {
        let mut runner = Runner::new(SessionConfig::default());
        runner.load_rows(build_demo_rows(&DemoConfig::default()));
        runner.apply_session();

        let summary = runner.summary();
        assert_eq!(summary.state, ViewState::RawScatter);
        assert_eq!(summary.visible_labels.len(), 2);
    }

    #[test]
    fn cell_edit_resets_the_view() {
        let config = SessionConfig {
            target: Some(TargetStar::Src2),
            ..Default::default()
        };
        let mut runner = Runner::new(config);
        runner.load_rows(build_demo_rows(&DemoConfig::default()));
        runner.apply_session();
        assert_eq!(runner.summary().state, ViewState::LightCurve);

        assert!(runner.set_cell(0, Column::Src1, Some(9.5)));
        assert_eq!(runner.summary().state, ViewState::RawScatter);
        assert_eq!(runner.controller().mode(), Mode::Lc);
    }

    #[test]
    fn row_insert_and_removal_rebuild_the_chart() {
        let mut runner = Runner::new(SessionConfig::default());
        runner.load_rows(build_demo_rows(&DemoConfig {
            rows: 3,
            ..Default::default()
        }));

        let index = runner.insert_row();
        assert_eq!(index, 3);
        // The empty row has no jd, so the raw series stay at three points.
        let chart = runner.controller().chart();
        assert_eq!(chart.dataset(photocore::chart::SeriesSlot::Src1).data.len(), 3);

        assert!(runner.remove_row(index));
        assert!(!runner.remove_row(99));
        assert_eq!(runner.table().len(), 3);
    }

    #[test]
    fn upload_replaces_demo_rows() {
        let mut runner = Runner::new(SessionConfig::default());
        runner.load_rows(build_demo_rows(&DemoConfig::default()));
        let contents = "id,mjd,mag\nstarA,100.5,14.2\nstarB,100.5,12.1\n";
        let kept = runner.ingest_upload("night.csv", contents).unwrap();
        assert_eq!(kept, 1);
        assert_eq!(runner.table().col_headers()[1], "starA Mag");
    }
}
