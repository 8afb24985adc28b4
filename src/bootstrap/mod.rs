mod runtime_setup;

use anyhow::Result;
use std::sync::Arc;

use crate::cli::Cli;
use crate::request_engine::TurnEngine;

pub struct BootstrappedRuntime {
    pub engine: Arc<TurnEngine>,
}

pub fn bootstrap(cli: &Cli) -> Result<BootstrappedRuntime> {
    let engine = runtime_setup::prepare_engine(cli)?;
    Ok(BootstrappedRuntime {
        engine: Arc::new(engine),
    })
}
