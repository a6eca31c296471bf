use anyhow::Context;
use quadview::config::{default_config_path, Config};
use quadview::layout::geometry::LayoutFrame;
use quadview::layout::{LayoutState, WindowSize};
use quadview::window::App;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Handle --print-default-config before any other initialization
    if args.iter().any(|a| a == "--print-default-config") {
        print!("{}", Config::print_default());
        return;
    }

    env_logger::init();

    if let Err(e) = run(&args) {
        log::error!("Application error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let config_path = default_config_path();
    let config = match Config::load(&config_path) {
        Ok(cfg) => {
            log::info!("Config loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            log::warn!("Config load error ({}), using defaults", e);
            Config::default()
        }
    };

    if let Some(pos) = args.iter().position(|a| a == "--print-layout") {
        let size = match args.get(pos + 1) {
            Some(spec) => parse_size(spec)?,
            None => WindowSize::new(config.window.height as f32, config.window.width as f32),
        };
        let state = LayoutState::with_ratios(size, config.layout.initial_ratios());
        let json = serde_json::to_string_pretty(&LayoutFrame::resolve(&state))?;
        println!("{json}");
        return Ok(());
    }

    log::info!(
        "QuadView v{} starting ({}x{}, resize strategy: {})",
        env!("CARGO_PKG_VERSION"),
        config.window.width,
        config.window.height,
        config.layout.resize_strategy.name()
    );

    // Only watch for reloads when the config directory exists.
    let watch_path = config_path
        .parent()
        .filter(|dir| dir.is_dir())
        .map(|_| config_path.clone());

    App::new(config, watch_path).run()
}

/// Parse `WIDTHxHEIGHT` into a window size.
fn parse_size(spec: &str) -> anyhow::Result<WindowSize> {
    let (w, h) = spec
        .split_once('x')
        .with_context(|| format!("expected WIDTHxHEIGHT, got '{spec}'"))?;
    let width: f32 = w.trim().parse().with_context(|| format!("bad width '{w}'"))?;
    let height: f32 = h.trim().parse().with_context(|| format!("bad height '{h}'"))?;
    anyhow::ensure!(width >= 0.0 && height >= 0.0, "window size must not be negative");
    Ok(WindowSize::new(height, width))
}
