use crate::chart::{ChartModel, InfoForm, SeriesSlot};
use crate::ingest::Upload;
use crate::table::DataTable;
use crate::telemetry::{LogManager, MetricsRecorder};
use crate::transform::{
    build_series, fold, light_curve, light_curve_label, spectrum, TargetStar, SPECTRUM_STEPS,
};
use serde::{Deserialize, Serialize};

/// Outer mode selector. Exactly one mode is active at a time; switching
/// modes never discards table data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lc,
    Ft,
    Pf,
}

/// Mutually exclusive visible-series states layered under [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
    RawScatter,
    LightCurve,
    Spectrum,
    FoldedCurve,
}

/// Owns the chart state and decides which of the five series is visible.
///
/// All transforms run synchronously on small in-memory arrays; the only
/// side-effecting step left to the caller is handing the chart model to the
/// rendering collaborator.
pub struct ChartController {
    chart: ChartModel,
    mode: Mode,
    state: ViewState,
    target: Option<TargetStar>,
    reference_mag: f64,
    period: f64,
    spectrum_start: f64,
    spectrum_stop: f64,
    derived_modes_enabled: bool,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ChartController {
    pub fn new() -> Self {
        Self {
            chart: ChartModel::new(),
            mode: Mode::Lc,
            state: ViewState::RawScatter,
            target: None,
            reference_mag: 0.0,
            period: 0.0,
            spectrum_start: 0.1,
            spectrum_stop: 1.0,
            derived_modes_enabled: false,
            logger: LogManager::new("view"),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn chart(&self) -> &ChartModel {
        &self.chart
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn target(&self) -> Option<TargetStar> {
        self.target
    }

    pub fn reference_mag(&self) -> f64 {
        self.reference_mag
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn spectrum_bounds(&self) -> (f64, f64) {
        (self.spectrum_start, self.spectrum_stop)
    }

    /// `(recomputes, rejected inputs)` counted so far.
    pub fn metrics(&self) -> (usize, usize) {
        self.metrics.snapshot()
    }

    /// Rebuilds the raw series and extent after any table mutation.
    ///
    /// Edited data always needs the light-curve view re-derived from
    /// scratch, so this drops back to the raw scatter and resets the mode
    /// selector to `Lc`; the derived series stay cleared until their mode
    /// is entered again.
    pub fn table_changed(&mut self, table: &DataTable) {
        let built = build_series(table.rows());
        self.chart.min_mjd = built.extent.min_mjd;
        self.chart.max_mjd = built.extent.max_mjd;

        self.chart.set_data(SeriesSlot::Src1, built.src1);
        self.chart.set_data(SeriesSlot::Src2, built.src2);
        for slot in [
            SeriesSlot::LightCurve,
            SeriesSlot::Spectrum,
            SeriesSlot::FoldedCurve,
        ] {
            self.chart.set_data(slot, Vec::new());
        }

        self.mode = Mode::Lc;
        self.chart.set_titles("Variable", "Julian Date", "Magnitude");
        self.show(ViewState::RawScatter);
        self.metrics.record_recompute();
        self.logger
            .record(&format!("table changed, {} rows", table.len()));
    }

    /// Loads an upload into the table: star names become column headers
    /// and raw-series labels, then the grid is rebuilt.
    pub fn apply_upload(&mut self, upload: &Upload, table: &mut DataTable) {
        table.set_col_headers([
            "Julian Date".to_string(),
            format!("{} Mag", upload.src1),
            format!("{} Mag", upload.src2),
        ]);
        table.replace_rows(upload.rows.clone());

        self.chart.dataset_mut(SeriesSlot::Src1).label = upload.src1.clone();
        self.chart.dataset_mut(SeriesSlot::Src2).label = upload.src2.clone();
        self.target = None;
        self.derived_modes_enabled = false;
        self.table_changed(table);
    }

    /// Selects the variable star (or clears the selection) and re-derives
    /// the light curve when that view is active.
    pub fn set_target(&mut self, target: Option<TargetStar>) {
        self.target = target;
        if self.mode == Mode::Lc {
            self.enter_light_curve();
        }
    }

    pub fn set_reference_mag(&mut self, reference_mag: f64) {
        self.reference_mag = reference_mag;
        if self.mode == Mode::Lc {
            self.enter_light_curve();
        }
    }

    pub fn set_period(&mut self, period: f64) {
        self.period = period;
        if self.mode == Mode::Pf {
            self.enter_folded();
        }
    }

    pub fn set_spectrum_bounds(&mut self, start: f64, stop: f64) {
        self.spectrum_start = start;
        self.spectrum_stop = stop;
        if self.mode == Mode::Ft {
            self.enter_spectrum();
        }
    }

    /// Switches the outer mode and recomputes that mode's series from the
    /// stored parameters. The derived modes stay unavailable until a light
    /// curve has been derived at least once.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != Mode::Lc && !self.derived_modes_enabled {
            self.logger.record("derived mode requested before a light curve exists");
            self.metrics.record_rejected();
            return;
        }
        self.mode = mode;
        match mode {
            Mode::Lc => self.enter_light_curve(),
            Mode::Ft => self.enter_spectrum(),
            Mode::Pf => self.enter_folded(),
        }
    }

    /// Exports the current labels for the chart-info form.
    pub fn info_form(&self) -> InfoForm {
        InfoForm::from_chart(&self.chart)
    }

    /// Applies user label overrides from the chart-info form.
    pub fn apply_info(&mut self, form: &InfoForm) {
        form.apply(&mut self.chart);
    }

    fn enter_light_curve(&mut self) {
        let Some(target) = self.target else {
            // No target selected yet: a valid state, shown as the two raw
            // comparison series.
            self.show(ViewState::RawScatter);
            return;
        };

        let target_slot = slot_of(target);
        let reference_slot = slot_of(target.reference());
        let curve = light_curve(
            &self.chart.dataset(target_slot).data,
            &self.chart.dataset(reference_slot).data,
            self.reference_mag,
        );
        self.chart.set_data(SeriesSlot::LightCurve, curve);

        let label = light_curve_label(self.reference_mag);
        for slot in [
            SeriesSlot::LightCurve,
            SeriesSlot::Spectrum,
            SeriesSlot::FoldedCurve,
        ] {
            self.chart.dataset_mut(slot).label = label.clone();
        }

        self.derived_modes_enabled = true;
        self.chart
            .set_titles("Light Curve", "Julian Date", "Magnitude");
        self.show(ViewState::LightCurve);
        self.metrics.record_recompute();
    }

    fn enter_spectrum(&mut self) {
        let Some(data) = spectrum(self.spectrum_start, self.spectrum_stop, SPECTRUM_STEPS) else {
            // Out-of-range bounds are ignored outright; the previous series
            // and visibility are retained.
            self.logger.record(&format!(
                "spectrum bounds rejected: start {} > stop {}",
                self.spectrum_start, self.spectrum_stop
            ));
            self.metrics.record_rejected();
            return;
        };

        self.chart.set_data(SeriesSlot::Spectrum, data);
        self.chart
            .set_titles("Fourier Transform", "Period (days)", "Power Spectrum");
        self.show(ViewState::Spectrum);
        self.metrics.record_recompute();
    }

    fn enter_folded(&mut self) {
        let folded = fold(
            &self.chart.dataset(SeriesSlot::LightCurve).data,
            self.period,
            self.chart.min_mjd,
        );
        self.chart.set_data(SeriesSlot::FoldedCurve, folded);
        self.chart
            .set_titles("Period Folding", "Julian Date", "Magnitude");
        self.show(ViewState::FoldedCurve);
        self.metrics.record_recompute();
    }

    fn show(&mut self, state: ViewState) {
        let visible: &[SeriesSlot] = match state {
            ViewState::RawScatter => &[SeriesSlot::Src1, SeriesSlot::Src2],
            ViewState::LightCurve => &[SeriesSlot::LightCurve],
            ViewState::Spectrum => &[SeriesSlot::Spectrum],
            ViewState::FoldedCurve => &[SeriesSlot::FoldedCurve],
        };
        self.chart.show_only(visible);
        self.chart.reverse_y = state != ViewState::Spectrum;
        self.state = state;
    }
}

impl Default for ChartController {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_of(star: TargetStar) -> SeriesSlot {
    match star {
        TargetStar::Src1 => SeriesSlot::Src1,
        TargetStar::Src2 => SeriesSlot::Src2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Row;

    fn seeded_table() -> DataTable {
        DataTable::with_rows(vec![
            Row::new(10.0, 14.0, 12.0),
            Row::new(20.0, 14.5, 12.1),
            Row::new(30.0, 13.8, 12.2),
        ])
    }

    #[test]
    fn initial_state_is_raw_scatter_under_lc() {
        let controller = ChartController::new();
        assert_eq!(controller.state(), ViewState::RawScatter);
        assert_eq!(controller.mode(), Mode::Lc);
    }

    #[test]
    fn table_change_rebuilds_raw_series_and_extent() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);

        let chart = controller.chart();
        assert_eq!(chart.dataset(SeriesSlot::Src1).data.len(), 3);
        assert_eq!(chart.dataset(SeriesSlot::Src2).data.len(), 3);
        assert_eq!(chart.min_mjd, 10.0);
        assert_eq!(chart.max_mjd, 30.0);
        assert_eq!(chart.title, "Variable");
    }

    #[test]
    fn selecting_a_target_derives_the_light_curve() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);
        controller.set_target(Some(TargetStar::Src1));

        assert_eq!(controller.state(), ViewState::LightCurve);
        let chart = controller.chart();
        let curve = &chart.dataset(SeriesSlot::LightCurve).data;
        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].y, 14.0 - 12.0);
        assert_eq!(chart.title, "Light Curve");
        assert_eq!(
            chart.dataset(SeriesSlot::LightCurve).label,
            "Variable Star Mag + (0 - Reference Star Mag)"
        );
    }

    #[test]
    fn reference_mag_offsets_the_curve_and_label() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);
        controller.set_target(Some(TargetStar::Src2));
        controller.set_reference_mag(1.5);

        let chart = controller.chart();
        assert_eq!(chart.dataset(SeriesSlot::LightCurve).data[0].y, 12.0 - 14.0 + 1.5);
        assert_eq!(
            chart.dataset(SeriesSlot::FoldedCurve).label,
            "Variable Star Mag + (1.5 - Reference Star Mag)"
        );
    }

    #[test]
    fn derived_modes_are_gated_on_a_light_curve() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);

        controller.set_mode(Mode::Ft);
        assert_eq!(controller.mode(), Mode::Lc);
        assert_eq!(controller.state(), ViewState::RawScatter);

        controller.set_target(Some(TargetStar::Src1));
        controller.set_mode(Mode::Ft);
        assert_eq!(controller.mode(), Mode::Ft);
        assert_eq!(controller.state(), ViewState::Spectrum);
    }

    #[test]
    fn spectrum_mode_flips_the_y_axis_back() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);
        controller.set_target(Some(TargetStar::Src1));
        assert!(controller.chart().reverse_y);

        controller.set_mode(Mode::Ft);
        let chart = controller.chart();
        assert!(!chart.reverse_y);
        assert_eq!(chart.dataset(SeriesSlot::Spectrum).data.len(), SPECTRUM_STEPS);
        assert_eq!(chart.title, "Fourier Transform");
        assert_eq!(chart.x_label, "Period (days)");
    }

    #[test]
    fn invalid_spectrum_bounds_keep_the_previous_series() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);
        controller.set_target(Some(TargetStar::Src1));
        controller.set_mode(Mode::Ft);
        let before = controller.chart().dataset(SeriesSlot::Spectrum).data.clone();

        controller.set_spectrum_bounds(2.0, 1.0);
        let chart = controller.chart();
        assert_eq!(chart.dataset(SeriesSlot::Spectrum).data, before);
        assert_eq!(controller.state(), ViewState::Spectrum);
    }

    #[test]
    fn folding_duplicates_and_zero_period_copies() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);
        controller.set_target(Some(TargetStar::Src1));

        controller.set_mode(Mode::Pf);
        // period defaults to 0: exact copy of the light curve.
        assert_eq!(
            controller.chart().dataset(SeriesSlot::FoldedCurve).data.len(),
            3
        );

        controller.set_period(7.0);
        assert_eq!(controller.state(), ViewState::FoldedCurve);
        assert_eq!(
            controller.chart().dataset(SeriesSlot::FoldedCurve).data.len(),
            6
        );
        assert_eq!(controller.chart().title, "Period Folding");
    }

    #[test]
    fn any_table_mutation_resets_to_raw_scatter_and_lc() {
        let mut controller = ChartController::new();
        let mut table = seeded_table();
        controller.table_changed(&table);
        controller.set_target(Some(TargetStar::Src1));
        controller.set_mode(Mode::Pf);
        assert_eq!(controller.state(), ViewState::FoldedCurve);

        table.insert_row();
        controller.table_changed(&table);
        assert_eq!(controller.state(), ViewState::RawScatter);
        assert_eq!(controller.mode(), Mode::Lc);
        assert!(controller
            .chart()
            .dataset(SeriesSlot::FoldedCurve)
            .data
            .is_empty());
    }

    #[test]
    fn upload_renames_headers_and_raw_series() {
        use crate::ingest::Upload;

        let mut controller = ChartController::new();
        let mut table = DataTable::new();
        let upload = Upload {
            src1: "starA".to_string(),
            src2: "starB".to_string(),
            rows: vec![Row::new(100.5, 14.2, 12.1)],
        };
        controller.apply_upload(&upload, &mut table);

        assert_eq!(table.col_headers()[1], "starA Mag");
        assert_eq!(controller.chart().dataset(SeriesSlot::Src1).label, "starA");
        assert_eq!(controller.state(), ViewState::RawScatter);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn info_form_round_trips_through_the_controller() {
        let mut controller = ChartController::new();
        let table = seeded_table();
        controller.table_changed(&table);

        let mut form = controller.info_form();
        form.title = "Algol".to_string();
        controller.apply_info(&form);
        assert_eq!(controller.chart().title, "Algol");
    }
}
