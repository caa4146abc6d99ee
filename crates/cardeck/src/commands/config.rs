use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::deck::Tuning;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!(
                "{} {key} = {value} ({})",
                "Saved".green().bold(),
                path.display()
            );
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let effective = Tuning::resolve(&config, &Default::default());

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("  {}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("{}", "Effective values:".bold());
    println!("  stack.y_offset        {}", effective.y_offset);
    println!("  stack.scale_step      {}", effective.scale_step);
    println!("  stack.min_scale       {}", effective.min_scale);
    println!("  input.drag_threshold  {}", effective.drag_threshold);
    println!("  cursor.enabled        {}", effective.cursor_enabled);
    println!(
        "  defaults.windowed     {}",
        config
            .defaults
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    );
    Ok(())
}
