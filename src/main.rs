use hydrolift::{ElevatorConfig, Engine};
use hydrolift::run_2d;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "elevator.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_config_from_yaml() -> Result<ElevatorConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let config: ElevatorConfig = serde_yaml::from_reader(reader)?;

    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "hydrolift=info".into()),
        )
        .init();

    let config = load_config_from_yaml()?;
    let engine = Engine::new(&config)?;
    run_2d(engine, config);

    Ok(())
}
