use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{error, info};

use crate::skills::{DataSource, DenseGrid, Selection, SourceTable};

mod chart;
mod choice;
mod render_utils;
mod ui;

use choice::MultiChoice;

pub const TITLE: &str = "LinkedIn: Relative Skill Group Penetration";

pub struct DashboardApp {
    source: Arc<dyn DataSource>,
    initial_selection: Selection,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<SourceTable, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    table: Arc<SourceTable>,
    source_label: String,
    skill_choice: MultiChoice,
    country_choice: MultiChoice,
    selection: Selection,
    grid: DenseGrid,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Arc<dyn DataSource>,
        initial_selection: Selection,
    ) -> Self {
        let state = Self::start_load(Arc::clone(&source));
        Self {
            source,
            initial_selection,
            state,
        }
    }

    fn spawn_load(source: Arc<dyn DataSource>) -> Receiver<Result<SourceTable, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = source.read_table().map_err(|error| {
                let error = anyhow::Error::new(error)
                    .context(format!("failed to load {}", source.describe()));
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: Arc<dyn DataSource>) -> AppState {
        info!(source = %source.describe(), "loading penetration table");
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(table)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            Arc::new(table),
                            self.source.describe(),
                            &self.initial_selection,
                        ))));
                    }
                    Ok(Err(message)) => {
                        error!("{message}");
                        transition = Some(AppState::Error(message));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading skill penetration table...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the skill penetration table");
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(Arc::clone(&self.source)));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
