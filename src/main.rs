use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

mod controller;
mod domain;
mod employee;
mod form;
mod inputter;
mod logging;
mod model;
mod seed;
mod states;
mod store;
mod table;
mod ui;

use controller::Controller;
use domain::{HRConfig, HRError};
use model::{Model, Status};
use ui::TableUI;

fn main() -> ExitCode {
    let config = HRConfig::parse();
    match run(&config) {
        Err(e) => {
            error!("Exiting with error: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run(config: &HRConfig) -> Result<(), HRError> {
    logging::init_logging(config.log_file.as_deref(), &config.log_level)?;
    info!("Starting hrnet with {:?}", config);

    let mut model = Model::init(config);
    if let Some(raw) = &config.seed {
        let path = seed::expand_path(raw)?;
        model.seed(seed::load_employees(&path)?);
    }

    let mut ui = TableUI::new();
    let controller = Controller::new(config);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut model, &mut ui, &controller);
    ratatui::restore();

    info!("Leaving with {} employees", model.employees().len());
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    model: &mut Model,
    ui: &mut TableUI,
    controller: &Controller,
) -> Result<(), HRError> {
    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(model)? {
            model.update(message);
        };
    }
    Ok(())
}
