use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use eframe::egui;
use tokio::sync::mpsc;

use graphql_chat::config::{self, AppConfig};
use graphql_chat::error::AppError;
use graphql_chat::network::{ChatClient, GraphqlTransport};
use graphql_chat::ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "graphql_chat",
    version,
    about = "Desktop chat client for a GraphQL message endpoint"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// GraphQL endpoint, overriding the config file
    #[arg(long, env = config::ENDPOINT_ENV, value_name = "URL")]
    endpoint: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Query the endpoint status once and exit
    Status,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config).with_endpoint_override(cli.endpoint);
    app_config.validate()?;

    let transport = GraphqlTransport::new(app_config.endpoint.clone())?;
    log::info!("Using GraphQL endpoint {}", transport.endpoint());

    if cli.mode == Some(Mode::Status) {
        return run_status_check(&transport).await;
    }

    run_chat_window(transport, app_config)
}

async fn run_status_check(transport: &GraphqlTransport) -> Result<(), AppError> {
    let status = transport.status().await?;
    println!("{}", status.as_deref().unwrap_or("unknown"));
    Ok(())
}

fn run_chat_window(transport: GraphqlTransport, app_config: AppConfig) -> Result<(), AppError> {
    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(16);

    tokio::spawn(ChatClient::new(transport, event_tx, cmd_rx).run());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    let mut event_rx = Some(event_rx);
    let title = app_config.title;
    let window_title = title.clone();

    eframe::run_native(
        &window_title,
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .ok_or("ChatApp should only be initialized once")?;

            Ok(Box::new(ChatApp::new(cc, title, cmd_tx, event_receiver)))
        }),
    )?;

    Ok(())
}
