use super::{CLIError, Command};

pub struct CompletionsCommand {
    app: clap::App<'static, 'static>,
    binary_name: &'static str,
    shell: clap::Shell,
}

impl CompletionsCommand {
    pub fn new(
        app: clap::App<'static, 'static>,
        binary_name: &'static str,
        shell: clap::Shell,
    ) -> Self {
        Self {
            app,
            binary_name,
            shell,
        }
    }
}

impl Command for CompletionsCommand {
    fn needs_checkout(&self) -> bool {
        false
    }

    fn run(&mut self) -> Result<(), CLIError> {
        self.app
            .gen_completions_to(self.binary_name, self.shell, &mut std::io::stdout());
        Ok(())
    }
}
