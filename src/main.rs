/// Headless demo of the carousel for native builds.
///
/// Usage: `backdrop-demo [config.json] [viewport-width]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::Duration;

    use backdrop::{CarouselConfig, HeadlessRuntime};
    use web_time::Instant;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match CarouselConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(1);
            }
        },
        None => CarouselConfig::for_cities(&["sf", "nyc", "la"], 4),
    };
    let viewport_width = args.next().and_then(|w| w.parse().ok()).unwrap_or(1280);

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .init();

    let mut runtime = match HeadlessRuntime::new(&config, viewport_width) {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    runtime.start();

    // Images trickle in every 400ms; the user switches city after 12s.
    let second_city = config.cities.get(1).cloned();
    let step = Duration::from_millis(400);
    let end = Duration::from_secs(40);
    while runtime.now() < end {
        runtime.advance(step);
        runtime.complete_next_load();
        if let Some(city) = &second_city {
            if runtime.now() >= Duration::from_secs(12) && runtime.selector().value() != city.as_str() {
                runtime.select_city(city);
            }
        }
    }

    let session = runtime.session();
    log::info!(
        "Simulated {:?} in {:?}: {}/{} images ready, showing {}",
        runtime.now(),
        started.elapsed(),
        session.cache().len(),
        session.catalog().slot_count(),
        session
            .active_slot()
            .map_or_else(|| "the placeholder".to_string(), |slot| slot.to_string())
    );
    runtime.shutdown();
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
