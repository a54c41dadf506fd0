/**
 * Glaze desktop app - main entry point
 *
 * Loads configuration, installs logging, and runs the egui front end.
 */
use std::sync::Arc;

use eframe::egui;
use glaze::app::theme::styles;
use glaze::app::{views, AppState, Config, FileTokenStore, MemoryTokenStore, TokenStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glaze=info")),
        )
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration, using defaults: {}", e);
        Config::new()
    });
    tracing::info!("Using API at {}", config.app().api_url);

    let tokens: Arc<dyn TokenStore> = match FileTokenStore::default_location() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Token will not persist across restarts: {}", e);
            Arc::new(MemoryTokenStore::new())
        }
    };

    let state = AppState::new(config, tokens)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Glaze",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(GlazeApp { state }))
        }),
    )?;
    Ok(())
}

struct GlazeApp {
    state: AppState,
}

impl eframe::App for GlazeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();

        views::render_top_bar(ctx, &mut self.state);

        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
