use clap::Parser;
use docket::cli::commands::Cli;
use docket::cli::handlers;
use docket::logging::LogTarget;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let result = handlers::load_session(&cli, LogTarget::Tui)
                .and_then(|(config, portfolio)| docket::tui::run(config, portfolio));
            if let Err(e) = result {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
