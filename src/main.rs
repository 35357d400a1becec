use anyhow::Result;
use log::{error, info};
use set_version::prompt::TerminalPrompt;
use set_version::{Config, Stamper};

fn main() {
    if let Err(err) = set_version::init_logger() {
        eprintln!("Failed to initialise logging: {}", err);
    }

    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    let stamper = Stamper::new(config.paths()?);
    info!(
        "Build number scheme: {}, metadata file: {}",
        config.build_number.scheme,
        stamper.paths().metadata.display()
    );

    let mut terminal = TerminalPrompt::new()?;
    stamper.run(&mut terminal, &config.build_number)?;
    Ok(())
}
