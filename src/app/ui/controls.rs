use eframe::egui::{self, RichText, Ui};

use crate::skills::ColorStrategy;

use super::super::ViewModel;
use super::super::choice::MultiChoice;

impl MultiChoice {
    /// Draws the widget and reports whether the selected values changed.
    pub(in crate::app) fn show(&mut self, ui: &mut Ui) -> bool {
        ui.label(RichText::new(self.title()).strong());

        let mut removed = None;
        ui.horizontal_wrapped(|ui| {
            if self.selected().is_empty() {
                ui.weak("Nothing selected");
            }
            for value in self.selected() {
                if ui
                    .button(format!("{value} ×"))
                    .on_hover_text("Remove from the chart")
                    .clicked()
                {
                    removed = Some(value.clone());
                }
            }
        });

        let title = self.title();
        ui.add(
            egui::TextEdit::singleline(self.query_mut())
                .hint_text("Type to search")
                .desired_width(f32::INFINITY),
        );

        let mut added = None;
        egui::ScrollArea::vertical()
            .id_salt(title)
            .max_height(180.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for option in self.matching_options() {
                    if ui.link(option).on_hover_text("Add to the chart").clicked() {
                        added = Some(option.to_owned());
                    }
                }
            });

        let mut changed = false;
        if let Some(value) = removed {
            changed |= self.deselect(&value);
        }
        if let Some(value) = added {
            changed |= self.select(&value);
        }
        changed
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Selection");
        ui.separator();
        ui.add_space(4.0);

        let mut changed = false;
        egui::ScrollArea::vertical()
            .id_salt("controls_scroll")
            .show(ui, |ui| {
                changed |= self.skill_choice.show(ui);
                ui.add_space(12.0);
                ui.separator();
                changed |= self.country_choice.show(ui);
                ui.add_space(12.0);
                ui.separator();

                ui.label(format!(
                    "{} skill groups × {} countries = {} bars",
                    self.grid.skills().len(),
                    self.grid.countries().len(),
                    self.grid.len()
                ));
                let missing = self
                    .grid
                    .entries()
                    .iter()
                    .filter(|entry| entry.ratio.is_none())
                    .count();
                if missing > 0 {
                    ui.label(format!("{missing} pairs have no data"))
                        .on_hover_text("These pairs are absent from the table or have blank values, and show as gaps.");
                }
                let palette = match self.grid.color_strategy() {
                    ColorStrategy::Qualitative(colors) => {
                        format!("Colors: one per country ({} colors)", colors.len())
                    }
                    ColorStrategy::Uniform(color) => format!("Colors: single color {color}"),
                };
                ui.label(palette);
                ui.label(format!(
                    "Table: {} rows, {} skill groups, {} countries",
                    self.table.len(),
                    self.table.skills().len(),
                    self.table.countries().len()
                ));
            });

        if changed {
            self.apply_selection();
        }
    }
}
