use fern::colors::{Color, ColoredLevelConfig};
use std::path::Path;

/// Wires up colored stderr output plus a plain log file under
/// `<base>/logs/`. Window toolkit crates are capped at warn so interactive
/// sessions stay readable.
pub fn init(base: &Path, verbose: bool) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let stderr_log = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .chain(std::io::stderr());

    let file_log = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(fern::log_file(base.join("logs").join("devai.log"))?);

    fern::Dispatch::new()
        .level(level)
        .level_for("eframe", log::LevelFilter::Warn)
        .level_for("egui_glow", log::LevelFilter::Warn)
        .level_for("winit", log::LevelFilter::Warn)
        .chain(stderr_log)
        .chain(file_log)
        .apply()?;

    Ok(())
}
