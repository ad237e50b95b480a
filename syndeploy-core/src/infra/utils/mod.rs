mod az_cli;
pub use az_cli::*;

mod sqlcmd;
pub use sqlcmd::*;

mod system_tool_runner;
pub use system_tool_runner::*;

mod terraform_cli;
pub use terraform_cli::*;
