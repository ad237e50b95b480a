pub use super::error::CLIError;

mod completions_command;
pub use completions_command::CompletionsCommand;

mod run_command;
pub use run_command::RunCommand;

mod status_command;
pub use status_command::StatusCommand;

pub trait Command {
    fn needs_checkout(&self) -> bool {
        true
    }

    fn run(&mut self) -> Result<(), CLIError>;
}
