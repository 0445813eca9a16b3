use std::sync::Arc;

use runebot::config::Config;
use runebot::gateway::GatewayClient;
use runebot::rest::RestClient;
use runebot::runes::RuneBook;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runebot=debug".into()),
        )
        .init();

    let config = Arc::new(Config::from_env());
    print_banner(&config);

    let rest = Arc::new(RestClient::new(
        config.api_url.clone(),
        config.token.clone(),
    ));
    let runes = Arc::new(RuneBook::new());
    let client = GatewayClient::new(Arc::clone(&config), rest, runes);

    // Runs until disconnected, then fails loudly. No reconnect.
    if let Err(e) = client.run().await {
        tracing::error!("gateway session ended: {e}");
        std::process::exit(1);
    }
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36mrunebot\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mapi\x1b[0m      {}", config.api_url);
    eprintln!("  \x1b[2mprefix\x1b[0m   {}", config.command_prefix);
    eprintln!("  \x1b[2midentity\x1b[0m {}", config.bot_username);
    eprintln!();
}
