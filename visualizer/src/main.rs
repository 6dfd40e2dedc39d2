use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use photocore::chart::Dataset;
use photocore::math::NumericHelper;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Variable Star Workbench".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    form: ViewForm,
    payload: Option<ChartPayload>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<ChartPayload, String>),
    FormFieldChanged(FormField, String),
    SelectMode(&'static str),
    SubmitView,
    ViewSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum FormField {
    Target,
    ReferenceMag,
    Period,
    SpectrumStart,
    SpectrumStop,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                form: ViewForm::default(),
                payload: None,
                status: "Waiting for chart data...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                let visible = payload.visible_point_count();
                state.status = format!(
                    "Chart '{}': {} visible points",
                    payload.title, visible
                );
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Chart fetch error: {err}");
                Task::none()
            }
            Message::FormFieldChanged(field, value) => {
                state.form.update_field(field, value);
                Task::none()
            }
            Message::SelectMode(mode) => {
                let request = state.form.to_request(Some(mode));
                state.push_history(format!("Mode change requested: {mode}"));
                Task::perform(post_view(request), Message::ViewSubmitted)
            }
            Message::SubmitView => {
                let request = state.form.to_request(None);
                Task::perform(post_view(request), Message::ViewSubmitted)
            }
            Message::ViewSubmitted(Ok(title)) => {
                state.status = format!("View updated: {title}");
                state.push_history(format!("View accepted: {title}"));
                Task::perform(fetch_payload(), Message::PayloadFetched)
            }
            Message::ViewSubmitted(Err(err)) => {
                state.status = format!("View error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let form_column = column![
            text("View Controls").size(26),
            row![
                button("Light Curve").on_press(Message::SelectMode("lc")),
                button("Fourier").on_press(Message::SelectMode("ft")),
                button("Period Folding").on_press(Message::SelectMode("pf")),
            ]
            .spacing(8),
            text_input("Variable star (none, src1, src2)", &state.form.target)
                .on_input(|value| Message::FormFieldChanged(FormField::Target, value))
                .padding(6),
            text_input("Reference star actual mag", &state.form.reference_mag)
                .on_input(|value| Message::FormFieldChanged(FormField::ReferenceMag, value))
                .padding(6),
            text_input("Folding period", &state.form.period)
                .on_input(|value| Message::FormFieldChanged(FormField::Period, value))
                .padding(6),
            text_input("Start period", &state.form.spectrum_start)
                .on_input(|value| Message::FormFieldChanged(FormField::SpectrumStart, value))
                .padding(6),
            text_input("Stop period", &state.form.spectrum_stop)
                .on_input(|value| Message::FormFieldChanged(FormField::SpectrumStop, value))
                .padding(6),
            button("Apply view")
                .on_press(Message::SubmitView)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Variable star: which comparison source is treated as the target; the other becomes the reference.")
                    .size(12),
                text("Reference mag: known magnitude of the reference star, added to the differential curve.")
                    .size(12),
                text("Folding period: period (days) the light curve is folded by; 0 leaves it unfolded.")
                    .size(12),
                text("Start/stop period: bounds of the spectrum display curve; start must not exceed stop.")
                    .size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let chart_title = state
            .payload
            .as_ref()
            .map(|payload| payload.title.clone())
            .unwrap_or_else(|| "No chart yet".into());

        let axis_labels = state
            .payload
            .as_ref()
            .map(|payload| format!("x: {} | y: {}", payload.x_label, payload.y_label))
            .unwrap_or_default();

        let scatter = Canvas::new(ScatterPlot::from_payload(state.payload.as_ref()))
            .width(Length::Fill)
            .height(Length::Fixed(380.0));

        let legend_entries = match &state.payload {
            Some(payload) => {
                let visible: Vec<&Dataset> = payload
                    .datasets
                    .iter()
                    .filter(|dataset| !dataset.hidden)
                    .collect();
                if visible.is_empty() {
                    Column::new().push(text("No visible series").size(12))
                } else {
                    visible.iter().fold(Column::new().spacing(4), |col, dataset| {
                        col.push(
                            text(format!(
                                "{} - {} points{}",
                                dataset.label,
                                dataset.data.len(),
                                last_point_readout(dataset)
                            ))
                            .size(12),
                        )
                    })
                }
            }
            None => Column::new().push(text("No chart data yet").size(12)),
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let chart_column = column![
            text(chart_title).size(26),
            scatter,
            text(axis_labels).size(14),
            text("Visible series").size(16),
            Container::new(legend_entries).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![form_column, chart_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

/// Tooltip-style readout of a series' last point, rounded for display.
fn last_point_readout(dataset: &Dataset) -> String {
    match dataset.data.last() {
        Some(point) => format!(
            ", last ({}, {})",
            NumericHelper::round(point.x, 2),
            NumericHelper::round(point.y, 2)
        ),
        None => String::new(),
    }
}

async fn fetch_payload() -> Result<ChartPayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/chart")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<ChartPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_view(request: ViewRequestBody) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/view")
        .json(&request)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        let body: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(body
            .get("title")
            .and_then(|title| title.as_str())
            .unwrap_or("view")
            .to_string())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, body))
    }
}

#[derive(Debug, Clone)]
struct ViewForm {
    target: String,
    reference_mag: String,
    period: String,
    spectrum_start: String,
    spectrum_stop: String,
}

impl Default for ViewForm {
    fn default() -> Self {
        Self {
            target: "none".into(),
            reference_mag: "0".into(),
            period: "0".into(),
            spectrum_start: "0.1".into(),
            spectrum_stop: "1".into(),
        }
    }
}

impl ViewForm {
    fn update_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Target => self.target = value,
            FormField::ReferenceMag => self.reference_mag = value,
            FormField::Period => self.period = value,
            FormField::SpectrumStart => self.spectrum_start = value,
            FormField::SpectrumStop => self.spectrum_stop = value,
        }
    }

    fn to_request(&self, mode: Option<&'static str>) -> ViewRequestBody {
        ViewRequestBody {
            mode: mode.map(str::to_string),
            target: if self.target.trim().is_empty() {
                None
            } else {
                Some(self.target.trim().to_string())
            },
            reference_mag: self.reference_mag.parse().ok(),
            period: self.period.parse().ok(),
            spectrum_start: self.spectrum_start.parse().ok(),
            spectrum_stop: self.spectrum_stop.parse().ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ViewRequestBody {
    mode: Option<String>,
    target: Option<String>,
    reference_mag: Option<f64>,
    period: Option<f64>,
    spectrum_start: Option<f64>,
    spectrum_stop: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    x_label: String,
    #[serde(default)]
    y_label: String,
    #[serde(default)]
    reverse_y: bool,
    #[serde(default)]
    datasets: Vec<Dataset>,
}

impl ChartPayload {
    fn visible_point_count(&self) -> usize {
        self.datasets
            .iter()
            .filter(|dataset| !dataset.hidden)
            .map(|dataset| dataset.data.len())
            .sum()
    }
}

#[derive(Clone)]
struct ScatterPlot {
    datasets: Vec<Dataset>,
    reverse_y: bool,
}

impl ScatterPlot {
    fn from_payload(payload: Option<&ChartPayload>) -> Self {
        match payload {
            Some(payload) => Self {
                datasets: payload
                    .datasets
                    .iter()
                    .filter(|dataset| !dataset.hidden)
                    .cloned()
                    .collect(),
                reverse_y: payload.reverse_y,
            },
            None => Self {
                datasets: Vec::new(),
                reverse_y: true,
            },
        }
    }
}

impl canvas::Program<Message> for ScatterPlot {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        let points: Vec<(f64, f64)> = self
            .datasets
            .iter()
            .flat_map(|dataset| dataset.data.iter().map(|point| (point.x, point.y)))
            .collect();

        if !points.is_empty() {
            let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
            let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
            let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
            let span_x = (max_x - min_x).max(1e-9);
            let span_y = (max_y - min_y).max(1e-9);

            let pad = 16.0_f32;
            let plot_width = bounds.width - 2.0 * pad;
            let plot_height = bounds.height - 2.0 * pad;

            let frame_border = Path::new(|builder| {
                builder.rectangle(
                    Point::new(pad, pad),
                    iced::Size::new(plot_width, plot_height),
                );
            });
            frame.stroke(
                &frame_border,
                Stroke::default().with_color(Color::from_rgb(0.3, 0.3, 0.35)),
            );

            for dataset in &self.datasets {
                let color = parse_hex_color(&dataset.color);
                let radius = dataset.point_radius.max(1.0) * 0.6;
                for point in &dataset.data {
                    let nx = ((point.x - min_x) / span_x) as f32;
                    let ny = ((point.y - min_y) / span_y) as f32;
                    let x = pad + nx * plot_width;
                    // Magnitude axes plot brighter (smaller) values upward.
                    let y = if self.reverse_y {
                        pad + ny * plot_height
                    } else {
                        pad + (1.0 - ny) * plot_height
                    };
                    let marker = Path::new(|builder| builder.circle(Point::new(x, y), radius));
                    frame.fill(&marker, color);
                }
            }
        }

        vec![frame.into_geometry()]
    }
}

fn parse_hex_color(color: &str) -> Color {
    let hex = color.trim_start_matches('#');
    if hex.len() == 6 {
        let channels = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        );
        if let (Ok(r), Ok(g), Ok(b)) = channels {
            return Color::from_rgb8(r, g, b);
        }
    }
    Color::from_rgb(0.7, 0.7, 0.7)
}
