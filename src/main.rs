use std::path::PathBuf;

use lifegrid::config::PlotParams;
use lifegrid::input::Source;
use lifegrid::render::Plotter;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw: Vec<String> = std::env::args().collect();
    let show = raw.iter().any(|a| a == "--show");
    let no_save = raw.iter().any(|a| a == "--no-save");
    let args: Vec<&String> = raw.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    let source = args.first().map_or("pattern:glider", |s| s.as_str());
    let steps: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    let out_dir: PathBuf = args
        .get(2)
        .map(|s| PathBuf::from(s.as_str()))
        .unwrap_or_else(|| PathBuf::from("plots"));
    let prefix = args.get(3).map_or("plot", |s| s.as_str());

    let mut config = match Source::parse(source).and_then(|s| s.load()) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let params = PlotParams {
        show_plots: show,
        save_plots: !no_save,
        file_prefix: prefix.to_string(),
        out_dir,
        ..PlotParams::default()
    };
    config.notify_on_construct = config.notify_on_construct && params.wants_output();

    log::info!(
        "Simulating {} for {} steps (show={}, save={})",
        source, steps, params.show_plots, params.save_plots
    );

    let (engine, timings) = match lifegrid::simulate(config, steps, Plotter::new(params)) {
        Ok(done) => done,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    // Print timings
    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let plotter = engine.renderer();
    eprintln!(
        "\nGeneration {}: {} alive, {} frames saved, {} failed",
        engine.generation(),
        engine.live_count(),
        plotter.saved().len(),
        plotter.failures()
    );
}
