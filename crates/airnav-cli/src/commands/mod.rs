// Each module handles one group of subcommands. main.rs parses the flags,
// loads the network and dispatches here.

pub mod query;
pub mod route;
