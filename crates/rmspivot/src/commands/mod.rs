//! Command dispatch: bridges CLI args -> core pivot builders -> output.

pub mod alarms;
pub mod config_cmd;
pub mod export_cmd;
pub mod offline;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to the appropriate handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Alarms(args) => alarms::handle(args, global),
        Command::Offline(args) => offline::handle(args, global),
        Command::Export(args) => export_cmd::handle(args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
