use clap::Parser;
use sparkfire::cli::{
    handle_add, handle_complete, handle_delete, handle_discard, handle_get, handle_list,
    handle_start, handle_update, Cli, Commands, Context,
};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so `--json` output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sparkfire=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = Context::from_args(cli.config, cli.data).and_then(|ctx| match cli.command {
        Commands::Add {
            title,
            item_type,
            json,
        } => handle_add(&ctx, title, item_type, json),
        Commands::List { status, json } => handle_list(&ctx, status, json),
        Commands::Get { id, json } => handle_get(&ctx, id, json),
        Commands::Start { id, json } => handle_start(&ctx, id, json),
        Commands::Discard { id, json } => handle_discard(&ctx, id, json),
        Commands::Complete { id, json } => handle_complete(&ctx, id, json),
        Commands::Update {
            id,
            title,
            item_type,
            takeaways,
            notes,
            clear_takeaways,
            clear_notes,
            json,
        } => handle_update(
            &ctx,
            id,
            title,
            item_type,
            takeaways,
            notes,
            clear_takeaways,
            clear_notes,
            json,
        ),
        Commands::Delete { id, force } => handle_delete(&ctx, id, force),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
