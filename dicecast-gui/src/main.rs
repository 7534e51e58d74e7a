use eframe::egui;

pub mod app;

const INITIAL_SIZE: (f32, f32) = (650.0, 550.0);

fn main() -> eframe::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::WINDOW_TITLE)
            .with_inner_size(egui::Vec2::new(INITIAL_SIZE.0, INITIAL_SIZE.1))
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        app::WINDOW_TITLE,
        options,
        Box::new(|cc| {
            app::theme::apply(&cc.egui_ctx);
            Ok(Box::new(app::App::new()?))
        }),
    )
}
