use std::path::PathBuf;

use anyhow::{Context, Result};
use easel_core::EngineConfig;
use easel_ui::EaselApp;
use tracing_subscriber::EnvFilter;

/// Usage: `easel [config.json]`
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    tracing::info!(?config, "starting easel");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("easel")
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "easel",
        options,
        Box::new(move |cc| Ok(Box::new(EaselApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
