use colored::*;
use expense_tracker::cli::{self, App, Commands, MenuChoice};
use expense_tracker::config::{self, ClientConfig};
use expense_tracker::error::AppError;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; .env is loaded first so its RUST_LOG applies
    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(None, "error"))
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid client configuration: {:?}", e);
            println!("{} {}", "Error:".red(), e);
            return Err(e.into());
        },
    };
    let app = App::new(&config);
    info!("Expense tracker client started");

    // Main interactive loop
    loop {
        println!("\n{}", cli::menu_text().cyan());

        let raw_choice = match cli::prompt_menu_choice() {
            Ok(raw) => raw,
            Err(e) => {
                // Terminal closed or prompt interrupted
                info!("Menu prompt ended: {}", e);
                println!("{}", "Exiting Expense Tracker...".green());
                break;
            },
        };

        let choice = match raw_choice.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(_) => {
                println!("{}", "Invalid choice. Please try again.".yellow());
                continue;
            },
        };

        // Collect and validate input locally before contacting the server
        let input = match choice {
            MenuChoice::Add => cli::prompt_new_expense().map(Commands::Add),
            MenuChoice::View => Ok(Commands::View),
            MenuChoice::Update => {
                cli::prompt_expense_update().map(|(id, draft)| Commands::Update { id, draft })
            },
            MenuChoice::Delete => cli::prompt_expense_id().map(|id| Commands::Delete { id }),
            MenuChoice::Exit => {
                println!("{}", "Exiting Expense Tracker...".green());
                break;
            },
        };

        let command = match input {
            Ok(command) => command,
            Err(AppError::Dialoguer(e)) => {
                info!("Prompt ended: {}", e);
                println!("{}", "Exiting Expense Tracker...".green());
                break;
            },
            Err(e) => {
                println!("{} {}", "Invalid input:".red(), e);
                continue;
            },
        };

        // Handle potential errors from command execution
        if let Err(e) = app.run_command(command.clone()).await {
            error!("Command execution failed: {:?}", e);
            println!("{}", command.describe_failure(&e).red());
        }
    }

    Ok(())
}
