//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use prognoznik::adapters::catalog::{FixtureCatalog, JsonFileCatalog};
use prognoznik::adapters::export::{CommandRasterizer, SvgCardExporter};
use prognoznik::adapters::share::{CommandShare, StdoutClipboard, SystemClipboard};
use prognoznik::adapters::ui::TerminalNotifier;
use prognoznik::adapters::ui::tui::TuiInputPort;
use prognoznik::ports::{
    CardExportPort, CatalogSource, ClipboardPort, InputPort, NotifierPort, SharePort,
};
use prognoznik::shared::config::AppConfig;
use prognoznik::usecases::{CatalogService, ExportService, ShareService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    prognoznik::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config not loaded, using defaults");
            AppConfig::default()
        }
    };

    // --- Catalog: JSON document if configured, embedded fixture otherwise ---
    let source: Box<dyn CatalogSource> = match cfg.catalog_path() {
        Some(path) => {
            info!(path = %path, "catalog source: JSON file");
            Box::new(JsonFileCatalog::new(path))
        }
        None => {
            info!("catalog source: embedded fixture");
            Box::new(FixtureCatalog::new())
        }
    };
    let catalog_service = Arc::new(
        CatalogService::load(source.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    // --- Share: native command (optional) with clipboard fallback ---
    let notifier: Arc<dyn NotifierPort> = Arc::new(TerminalNotifier::new());
    let native: Option<Arc<dyn SharePort>> = cfg
        .share_command()
        .and_then(|cmd| CommandShare::from_command_line(&cmd))
        .map(|s| Arc::new(s) as Arc<dyn SharePort>);
    if native.is_none() {
        info!("no PROGNOZNIK_SHARE_COMMAND, sharing copies the link to the clipboard");
    }
    let clipboard: Arc<dyn ClipboardPort> = if cfg.clipboard_stdout() {
        Arc::new(StdoutClipboard)
    } else {
        Arc::new(SystemClipboard::new())
    };
    let share_service = Arc::new(ShareService::new(
        native,
        clipboard,
        Arc::clone(&notifier),
        cfg.share_origin_or_default(),
    ));

    // --- Export: rasterizer command if configured, SVG card otherwise ---
    let exporter: Arc<dyn CardExportPort> = match cfg
        .rasterizer_command()
        .and_then(|cmd| CommandRasterizer::from_command_line(&cmd))
    {
        Some(r) => Arc::new(r),
        None => {
            warn!("PROGNOZNIK_RASTERIZER_COMMAND not set, cards are exported as SVG");
            Arc::new(SvgCardExporter::new())
        }
    };
    let export_dir = PathBuf::from(cfg.export_dir_or_default());
    info!(path = %export_dir.display(), "export directory");
    let export_service = Arc::new(ExportService::new(
        exporter,
        Arc::clone(&notifier),
        export_dir,
    ));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        catalog_service,
        share_service,
        export_service,
    ));

    // --- Run (main menu -> list / rankings / expert page) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
