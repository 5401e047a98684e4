use std::io::{stdout, BufWriter, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};

use side_shooter::app::App;
use side_shooter::config::Config;
use side_shooter::image_cache::PngLoader;

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // RUST_LOG overrides; keep the default quiet since the game owns the screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv0 = std::env::args().next();
    let config = Config::from_env(argv0.as_deref());
    let loader = PngLoader::new(&config.asset_dir);
    log::info!("assets from '{}'", loader.base_dir().display());
    let mut app = App::new(config, loader);

    let mut out = BufWriter::new(stdout());
    let keyboard_enhanced = enter_terminal(&mut out)?;

    let result = app.run(&mut out, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    app.shutdown();
    result.context("game loop failed")
}

/// Raw mode, alternate screen, hidden cursor. Returns whether key-release
/// reporting could be enabled.
fn enter_terminal<W: Write>(out: &mut W) -> Result<bool> {
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let entered = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|out| out.execute(cursor::Hide).map(|_| ()));
    if let Err(err) = entered {
        let _ = terminal::disable_raw_mode();
        return Err(err).context("entering the alternate screen");
    }

    // Key-release events only arrive from kitty-protocol terminals; the
    // push itself succeeds on any terminal, so ask first.
    if !matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
        log::info!("no key-release reporting, holding keys by repeat timing");
        return Ok(false);
    }
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}
