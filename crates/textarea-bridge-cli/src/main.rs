use anyhow::{Context, Result};
use std::{env, path::PathBuf, process};
use textarea_bridge_config::Config;

mod script;

use script::{Script, replay};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <script.toml>", args[0]);
        eprintln!("Replays recorded textarea observations and prints the deduced input");
        process::exit(1);
    }
    let script_path = PathBuf::from(&args[1]);

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let content = std::fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let script = Script::parse(&content)
        .with_context(|| format!("Failed to parse script {}", script_path.display()))?;
    let document = script.document.clone();
    let actions = script.actions()?;
    log::info!(
        "Replaying {} steps from {}",
        actions.len(),
        script_path.display()
    );

    let (events, text) = replay(&document, actions, config.input_tracker());
    for event in &events {
        println!("{event}");
    }
    println!("---");
    println!("{text}");

    Ok(())
}
