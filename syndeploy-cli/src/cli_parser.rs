use clap::{App, AppSettings, Arg, Shell, SubCommand};

pub fn cli(binary_name: &'static str, version: &'static str) -> App<'static, 'static> {
    App::new(binary_name)
        .global_settings(&[AppSettings::ColoredHelp])
        .settings(&[AppSettings::SubcommandRequiredElseHelp])
        .version(version)
        .about("Configures a freshly provisioned Synapse analytics workspace")
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity (repeat for more)"),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Runs the post-deployment configuration sequence")
                .arg(
                    Arg::with_name("best-effort")
                        .long("best-effort")
                        .help("Continue past failing configuration steps instead of aborting"),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Shows the state of the current deployment checkout"),
        )
        .subcommand(
            SubCommand::with_name("completions")
                .about("Generate tab-completion scripts for your shell")
                .after_help(indoc::indoc!(
                    r"
                    The script outputs on `stdout`, allowing one to re-direct the
                    output to the file of their choosing. Where you place the file
                    will depend on which shell and which operating system you are
                    using. Your particular configuration may also determine where
                    these scripts need to be placed.

                    Example for bash:

                        $ source <(syndeploy completions bash)
                    "
                ))
                .arg(
                    Arg::with_name("shell")
                        .required(true)
                        .possible_values(&Shell::variants()),
                ),
        )
}
