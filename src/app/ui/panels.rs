use std::sync::Arc;

use eframe::egui::{self, Context, RichText};
use tracing::{debug, info};

use crate::skills::{Selection, SourceTable};

use super::super::chart::draw_chart;
use super::super::choice::MultiChoice;
use super::super::{TITLE, ViewModel};

const DOCUMENTATION_URL: &str = "https://docs.datapartnership.org/notebooks/linkedin/examples/linkedin_skills_benchmarking/linkedin_skills_benchmarking.html";
const DATA_SOURCE_URL: &str = "https://datacatalog.worldbank.org/dataset/skills-linkedin-data";

const DESCRIPTION: &str = "The metric captures the average penetration of a given skill group \
across all occupations in a country, as a ratio of the global average across the same occupation \
set. For example, the average penetration of Artificial Intelligence Skills across all occupations \
in India is 3.57X the global average across the same set of occupations.";

impl ViewModel {
    pub(in crate::app) fn new(
        table: Arc<SourceTable>,
        source_label: String,
        initial_selection: &Selection,
    ) -> Self {
        let skill_choice = MultiChoice::new(
            "Select Skills",
            table.skills().to_vec(),
            initial_selection.skills().to_vec(),
        );
        let country_choice = MultiChoice::new(
            "Select Countries",
            table.countries().to_vec(),
            initial_selection.countries().to_vec(),
        );
        let selection = initial_selection.clone();
        let grid = selection.grid(&table);
        info!(entries = grid.len(), "built initial dense grid");

        Self {
            table,
            source_label,
            skill_choice,
            country_choice,
            selection,
            grid,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(TITLE);
                ui.add_space(4.0);
                ui.label(DESCRIPTION);
                ui.horizontal_wrapped(|ui| {
                    ui.label("Learn more on the");
                    ui.hyperlink_to("documentation", DOCUMENTATION_URL);
                    ui.label(".");
                });
                ui.add_space(4.0);
            });

        egui::TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label("Data Source:");
                    ui.hyperlink(DATA_SOURCE_URL);
                    ui.separator();
                    ui.label(RichText::new(format!("loaded from {}", self.source_label)).small());
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(400.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            draw_chart(ui, &self.grid);
        });
    }

    /// Re-derives the selection from the widgets and rebuilds the grid when it
    /// changed.
    pub(in crate::app) fn apply_selection(&mut self) {
        let selection = Selection::new(
            self.skill_choice.selected().iter().cloned(),
            self.country_choice.selected().iter().cloned(),
        );
        if selection == self.selection {
            return;
        }

        debug!(
            skills = ?selection.skills(),
            countries = ?selection.countries(),
            "selection changed"
        );
        self.grid = selection.grid(&self.table);
        self.selection = selection;
        info!(
            skills = self.selection.skills().len(),
            countries = self.selection.countries().len(),
            entries = self.grid.len(),
            "rebuilt dense grid"
        );
    }
}
