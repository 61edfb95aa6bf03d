use ario_admin::cli::{
    handle_completions, handle_config_init, load_config, notify, status, Cli, Commands,
    ConfigCommands, NotifyCommands,
};
use ario_admin::notifications::NotificationStore;
use clap::Parser;
use std::path::Path;

fn open_store(config_path: &Path) -> Result<NotificationStore, Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    Ok(NotificationStore::new(config.notifications.path))
}

fn print_output(
    result: Result<String, Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => ario_admin::cli::serve::run_serve(args).await,
        Commands::Status(args) => match load_config(&args.config) {
            Ok(config) => print_output(status::handle_status(&args, &config.services).await),
            Err(e) => Err(e.into()),
        },
        Commands::Notify(cmd) => match cmd {
            NotifyCommands::List(args) => match open_store(&args.store.config) {
                Ok(store) => print_output(notify::handle_notify_list(&args, &store).await),
                Err(e) => Err(e),
            },
            NotifyCommands::Add(args) => match open_store(&args.store.config) {
                Ok(store) => print_output(notify::handle_notify_add(&args, &store).await),
                Err(e) => Err(e),
            },
            NotifyCommands::Read(args) => match open_store(&args.store.config) {
                Ok(store) => print_output(notify::handle_notify_read(args.id, &store).await),
                Err(e) => Err(e),
            },
            NotifyCommands::ReadAll(args) => match open_store(&args.config) {
                Ok(store) => print_output(notify::handle_notify_read_all(&store).await),
                Err(e) => Err(e),
            },
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
