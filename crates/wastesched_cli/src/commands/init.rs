//! Schema initialization command
//!
//! Usage: wastesched init [--reset]

use super::CommandResult;
use clap::Args;
use wastesched_core::WasteStore;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Drop all existing rows and recreate the schema
    #[arg(long)]
    pub reset: bool,
}

/// Opening the store already applied migrations; `--reset` starts from empty.
pub fn execute(args: InitArgs, store: &mut WasteStore) -> CommandResult {
    if args.reset {
        store.reset()?;
    }
    println!("database initialized");
    Ok(())
}
