use std::time::Duration;

use dicecast::prelude::*;
use eframe::egui::{self, RichText};

pub mod session;
pub mod theme;

pub const WINDOW_TITLE: &str = "Pro Probability Dice Engine";

pub struct App {
    pub input: String,
    pub animation: RollAnimation,
    pub session_app: session::SessionApp,
    roller: Roller,
    estimator: RarityEstimator,
    next_tick_at: f64,
}

impl App {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(Settings::default(), Roller::new())
    }

    pub fn with_settings(settings: Settings, roller: Roller) -> anyhow::Result<Self> {
        let settings = settings.validate()?;
        let mut animation = RollAnimation::new(&settings);
        animation.add_hook(LoggingHook);
        animation.add_hook(TallyHook::new());
        Ok(Self {
            input: String::new(),
            animation,
            session_app: session::SessionApp::default(),
            roller,
            estimator: RarityEstimator::new(settings.trials)?,
            next_tick_at: 0.0,
        })
    }

    /// Handles the cast control. `now` is the frame clock in seconds.
    pub fn cast(&mut self, now: f64) {
        if self.animation.start(&self.input).is_ok() {
            self.next_tick_at = now + self.animation.tick_interval().as_secs_f64();
        }
    }

    /// Runs any tick that has come due and reports how long until the next one.
    ///
    /// Returns `None` once nothing is animating, so the caller can stop
    /// scheduling repaints.
    pub fn advance(&mut self, now: f64) -> Option<Duration> {
        if !self.animation.is_rolling() {
            return None;
        }
        if now >= self.next_tick_at {
            if let Some(TickEvent::Settled(outcome)) =
                self.animation.tick(&mut self.roller, &self.estimator)
            {
                self.session_app.record(outcome);
                return None;
            }
            self.next_tick_at = now + self.animation.tick_interval().as_secs_f64();
        }
        Some(Duration::from_secs_f64((self.next_tick_at - now).max(0.0)))
    }

    /// Drops the session history and the tally metrics that summarize it.
    pub fn clear_session(&mut self) {
        log::info!(
            "Clearing {} outcomes from history.",
            self.session_app.history.len()
        );
        self.session_app.history.clear();
        self.animation.reset_hooks();
    }

    fn status_color(&self) -> egui::Color32 {
        match self.animation.status() {
            Status::InvalidInput => theme::ERROR,
            Status::Result { .. } => theme::FOREGROUND,
            Status::Waiting | Status::Rolling => theme::MUTED,
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let mut cast = false;
        let mut clear = false;

        let panel_frame = egui::Frame::new()
            .fill(theme::BACKGROUND)
            .inner_margin(egui::Margin::same(40));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 25.0;

                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new("DICE PRO ANALYTICS")
                                .size(theme::TITLE_SIZE)
                                .strong()
                                .color(theme::ACCENT),
                        );
                    });

                    ui.horizontal(|ui| {
                        let input = ui.add(
                            egui::TextEdit::singleline(&mut self.input)
                                .hint_text("Count (1-5)")
                                .margin(egui::Margin::same(12))
                                .desired_width(ui.available_width() - 120.0),
                        );
                        if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            cast = true;
                        }

                        let button = egui::Button::new(
                            RichText::new("CAST").strong().color(theme::BACKGROUND),
                        )
                        .fill(theme::ACCENT)
                        .min_size(egui::vec2(100.0, 40.0));
                        if ui
                            .add_enabled(!self.animation.is_rolling(), button)
                            .on_hover_cursor(egui::CursorIcon::PointingHand)
                            .clicked()
                        {
                            cast = true;
                        }
                    });

                    egui::Frame::new()
                        .fill(theme::SURFACE)
                        .corner_radius(egui::CornerRadius::same(12))
                        .inner_margin(egui::Margin::same(20))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.vertical_centered(|ui| {
                                let text = match self.animation.current_roll() {
                                    Some(roll) => render_roll(roll),
                                    None => render_placeholder().to_string(),
                                };
                                ui.add(
                                    egui::Label::new(
                                        RichText::new(text)
                                            .monospace()
                                            .size(theme::GLYPH_SIZE)
                                            .color(theme::DICE),
                                    )
                                    .wrap_mode(egui::TextWrapMode::Extend),
                                );
                            });
                        });

                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(self.animation.status().to_string())
                                .size(theme::STATUS_SIZE)
                                .color(self.status_color()),
                        );
                    });

                    let metrics = self.animation.metrics();
                    clear = self.session_app.ui(ui, &metrics);
                });
            });

        if clear {
            self.clear_session();
        }
        if cast {
            self.cast(now);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        let wait = self.advance(now);

        self.ui(ctx);

        // The timer is the repaint schedule; egui sleeps otherwise.
        if self.animation.is_rolling() {
            ctx.request_repaint_after(wait.unwrap_or(self.animation.tick_interval()));
        }
    }
}
