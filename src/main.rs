use clap::Parser;
use notekeep::cli::{
    handle_add, handle_clear, handle_delete, handle_edit, handle_init, handle_list,
    handle_session, handle_show, Cli, Commands,
};
use notekeep::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => handle_init().await,
        Commands::Add { text, stdin, json } => handle_add(text, stdin, json).await,
        Commands::List { json } => handle_list(json).await,
        Commands::Show { id, json } => handle_show(id, json).await,
        Commands::Edit {
            id,
            text,
            stdin,
            json,
        } => handle_edit(id, text, stdin, json).await,
        Commands::Delete { id, force } => handle_delete(id, force).await,
        Commands::Clear { force } => handle_clear(force).await,
        Commands::Session => handle_session().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(if e.is_validation() { 2 } else { 1 });
    }
}
