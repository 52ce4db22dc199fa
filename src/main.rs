use std::{process::ExitCode, rc::Rc};

use clap::Parser;
use log::{error, info};
use sistematiza::{App, Cli, Config, FileStore, NoteRepository, Result, StyleGuideStore};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let store = Rc::new(FileStore::open(&config.data_dir)?);
    let repository = NoteRepository::initialize(Rc::clone(&store))
        .with_date_format(config.date_format.clone());
    let style_guide = StyleGuideStore::new(store);

    let mut app = App::new(repository, style_guide, config, cli.verbose);
    app.run(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", console::style(e).red());
            ExitCode::FAILURE
        }
    }
}
