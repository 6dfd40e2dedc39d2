use crate::gui_bridge::model::{CellEdit, ChartPayload, RowIndex, UploadRequest, ViewRequest};
use crate::session::config::parse_target;
use crate::session::runner::Runner;
use anyhow::Result;
use photocore::chart::{InfoForm, SeriesSlot};
use photocore::prelude::ChartError;
use photocore::table::Row;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Applies a sparse view request onto the runner: parameters first, then
/// the mode switch that re-derives the active series.
fn apply_view(runner: &mut Runner, request: &ViewRequest) {
    if let Some(reference_mag) = request.reference_mag {
        runner.set_reference_mag(reference_mag);
    }
    if let Some(period) = request.period {
        runner.set_period(period);
    }
    if request.spectrum_start.is_some() || request.spectrum_stop.is_some() {
        let (start, stop) = runner.controller().spectrum_bounds();
        runner.set_spectrum_bounds(
            request.spectrum_start.unwrap_or(start),
            request.spectrum_stop.unwrap_or(stop),
        );
    }
    if let Some(name) = request.target.as_deref() {
        runner.set_target(resolve_target(runner, name));
    }
    if let Some(mode) = request.mode {
        runner.set_mode(mode);
    }
}

/// Star names arrive as either the raw-series labels (upload-renamed) or
/// the fixed `src1`/`src2` identifiers; anything else clears the target.
fn resolve_target(runner: &Runner, name: &str) -> Option<photocore::transform::TargetStar> {
    let chart = runner.controller().chart();
    if name == chart.dataset(SeriesSlot::Src1).label {
        Some(photocore::transform::TargetStar::Src1)
    } else if name == chart.dataset(SeriesSlot::Src2).label {
        Some(photocore::transform::TargetStar::Src2)
    } else {
        parse_target(name)
    }
}

/// Bridge that hosts the chart HTTP endpoint and processes incoming edits.
pub struct GuiBridge {
    state: Arc<RwLock<ChartPayload>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Mutex<Runner>>) -> Self {
        let state = Arc::new(RwLock::new(ChartPayload::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("chart")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<ChartPayload>>| warp::reply::json(&*state.read().unwrap()));

        let table_route = warp::path("table")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |rows: Vec<Row>,
                 state: Arc<RwLock<ChartPayload>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    guard.load_rows(rows);
                    let payload = ChartPayload::from(guard.controller().chart());
                    let row_count = guard.table().len();
                    drop(guard);
                    *state.write().unwrap() = payload;
                    Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok", "rows": row_count})),
                        StatusCode::OK,
                    ))
                },
            );

        let upload_route = warp::path("upload")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |upload: UploadRequest,
                 state: Arc<RwLock<ChartPayload>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    match guard.ingest_upload(&upload.file_name, &upload.contents) {
                        Ok(rows) => {
                            let payload = ChartPayload::from(guard.controller().chart());
                            drop(guard);
                            *state.write().unwrap() = payload;
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({"status": "ok", "rows": rows})),
                                StatusCode::OK,
                            ))
                        }
                        Err(
                            err @ (ChartError::UnsupportedUpload(_)
                            | ChartError::MalformedUpload(_)),
                        ) => Ok(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": err.to_string(),
                            })),
                            StatusCode::BAD_REQUEST,
                        )),
                        Err(err) => {
                            eprintln!("upload error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let add_row_route = warp::path("row")
            .and(warp::post())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |state: Arc<RwLock<ChartPayload>>, runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    let index = guard.insert_row();
                    let payload = ChartPayload::from(guard.controller().chart());
                    drop(guard);
                    *state.write().unwrap() = payload;
                    Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok", "row": index})),
                        StatusCode::OK,
                    ))
                },
            );

        let cell_route = warp::path("cell")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |edit: CellEdit,
                 state: Arc<RwLock<ChartPayload>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    let changed = guard.set_cell(edit.row, edit.column, edit.value);
                    let payload = ChartPayload::from(guard.controller().chart());
                    drop(guard);
                    if changed {
                        *state.write().unwrap() = payload;
                        Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({"status": "ok"})),
                            StatusCode::OK,
                        ))
                    } else {
                        Ok(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": format!("no row {}", edit.row),
                            })),
                            StatusCode::BAD_REQUEST,
                        ))
                    }
                },
            );

        let remove_row_route = warp::path("row")
            .and(warp::delete())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |request: RowIndex,
                 state: Arc<RwLock<ChartPayload>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    let changed = guard.remove_row(request.row);
                    let payload = ChartPayload::from(guard.controller().chart());
                    drop(guard);
                    if changed {
                        *state.write().unwrap() = payload;
                        Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({"status": "ok"})),
                            StatusCode::OK,
                        ))
                    } else {
                        Ok(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": format!("no row {}", request.row),
                            })),
                            StatusCode::BAD_REQUEST,
                        ))
                    }
                },
            );

        let info_get_route = warp::path("info")
            .and(warp::get())
            .and(runner_filter.clone())
            .map(|runner: Arc<Mutex<Runner>>| {
                let guard = runner.lock().unwrap();
                warp::reply::json(&guard.info_form())
            });

        let info_post_route = warp::path("info")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |form: InfoForm,
                 state: Arc<RwLock<ChartPayload>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    guard.apply_info(&form);
                    let payload = ChartPayload::from(guard.controller().chart());
                    drop(guard);
                    *state.write().unwrap() = payload;
                    Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok"})),
                        StatusCode::OK,
                    ))
                },
            );

        let view_route = warp::path("view")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |request: ViewRequest,
                 state: Arc<RwLock<ChartPayload>>,
                 runner: Arc<Mutex<Runner>>| async move {
                    let mut guard = runner.lock().unwrap();
                    apply_view(&mut guard, &request);
                    let payload = ChartPayload::from(guard.controller().chart());
                    let title = payload.title.clone();
                    drop(guard);
                    *state.write().unwrap() = payload;
                    Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok", "title": title})),
                        StatusCode::OK,
                    ))
                },
            );

        thread::spawn(move || {
            let routes = get_route
                .or(table_route)
                .or(upload_route)
                .or(add_row_route)
                .or(cell_route)
                .or(remove_row_route)
                .or(info_get_route)
                .or(info_post_route)
                .or(view_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, payload: &ChartPayload) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = payload.clone();
        println!(
            "[GUI] chart '{}', visible series: {}",
            guard.title,
            guard
                .datasets
                .iter()
                .filter(|dataset| !dataset.hidden)
                .count()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ChartPayload {
        self.state.read().unwrap().clone()
    }
}
