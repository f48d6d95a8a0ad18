//! Side Blaster entry point
//!
//! On the web the page drives `WebSession` (see `platform::web`); the wasm
//! start hook sets up logging. Natively this runs a headless demo: the
//! autopilot plays one game on a fixed 60 Hz clock and the HUD is logged.
//!
//! Usage: `side-blaster [settings.json] [max_ticks]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use side_blaster::Settings;
    use side_blaster::audio::LogAudio;
    use side_blaster::consts::TICKS_PER_SECOND;
    use side_blaster::platform::ManualClock;
    use side_blaster::renderer::LogRenderer;
    use side_blaster::session::Session;
    use side_blaster::sim::{SpriteKind, autopilot};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Side Blaster (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not load settings from {}: {}; using defaults", path, e);
                Settings::default()
            }
        },
        _ => Settings::default(),
    };
    let max_ticks: u64 = match args.next().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad max_ticks argument ({}); running 10 minutes", e);
            u64::from(TICKS_PER_SECOND) * 600
        }
        None => u64::from(TICKS_PER_SECOND) * 600,
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let clock = ManualClock::default();
    let mut session = Session::new(settings, Box::new(clock.clone()), seed);

    // Stand-in for the browser's image loads
    let generation = session.generation();
    session.sprite_loaded(generation, SpriteKind::Player, 100.0, 120.0);
    session.sprite_loaded(generation, SpriteKind::Enemy, 48.0, 48.0);
    session.sprite_loaded(generation, SpriteKind::Boss, 800.0, 800.0);
    session.start();

    let frame_ms = 1000.0 / f64::from(TICKS_PER_SECOND);
    let mut renderer = LogRenderer::default();
    let mut audio = LogAudio::default();

    while !session.state().is_game_over() && session.state().time_ticks < max_ticks {
        let input = autopilot(session.state(), session.now_ms());
        session.queue_input(&input);
        if !session.frame(&mut renderer, &mut audio) {
            break;
        }
        clock.advance(frame_ms);
    }

    let state = session.state();
    log::info!(
        "Finished after {} ticks: score {}, lives {}, {} frames, {} sounds",
        state.time_ticks,
        state.score,
        state.health.lives(),
        renderer.frames(),
        audio.played()
    );
    session.teardown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init_logging, this is just to satisfy the compiler
}
