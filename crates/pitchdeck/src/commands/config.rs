use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "  (not created yet, showing defaults)".dimmed());
    }
    println!();

    let theme = config.theme().unwrap_or("light");
    let start_slide = config
        .start_slide()
        .map_or_else(|| "1".to_string(), |n| n.to_string());
    println!("  {:<24} {}", "defaults.theme".cyan(), theme);
    println!("  {:<24} {}", "defaults.start_slide".cyan(), start_slide);
    println!("  {:<24} {}", "defaults.windowed".cyan(), config.windowed());
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::debug!(path = %path.display(), "config saved");
    println!("{} {key} = {value}", "Set".green().bold());
    Ok(())
}
