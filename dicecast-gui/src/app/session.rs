use dicecast::prelude::*;
use eframe::egui;

use crate::app::theme;

#[derive(Default)]
pub struct SessionApp {
    pub history: Vec<Outcome>,
}

impl SessionApp {
    pub fn record(&mut self, outcome: Outcome) {
        self.history.push(outcome);
    }

    /// Returns `true` when the user asked to clear the session.
    pub fn ui(&mut self, ui: &mut egui::Ui, metrics: &[(String, f64)]) -> bool {
        let mut clear = false;
        egui::CollapsingHeader::new("Session")
            .default_open(false)
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 4.0;
                if self.history.is_empty() {
                    ui.colored_label(theme::MUTED, "No casts yet.");
                    return;
                }

                if ui.button("Clear History").clicked() {
                    clear = true;
                    return;
                }

                egui::Grid::new("history_grid")
                    .striped(true)
                    .min_col_width(80.0)
                    .show(ui, |ui| {
                        ui.strong("Time");
                        ui.strong("Dice");
                        ui.strong("Total");
                        ui.strong("Rarity");
                        ui.end_row();
                        for outcome in self.history.iter().rev() {
                            let time = outcome.settled_at.with_timezone(&chrono::Local);
                            ui.label(time.format("%H:%M:%S").to_string());
                            ui.label(format!("{}d{}", outcome.roll.len(), SIDES));
                            ui.label(outcome.total.to_string());
                            ui.label(outcome.rarity.to_string());
                            ui.end_row();
                        }
                    });

                ui.separator();

                egui::Grid::new("metrics_grid")
                    .striped(true)
                    .min_col_width(160.0)
                    .show(ui, |ui| {
                        for (name, value) in metrics {
                            ui.label(name);
                            ui.label(format!("{:.2}", value));
                            ui.end_row();
                        }
                    });
            });
        clear
    }
}
