//! voxbridge CLI — standalone config server.
//!
//! ```text
//! voxbridge serve [--port 3002] [--host 127.0.0.1] [--static-dir public]
//! voxbridge config [--server http://localhost:3002]
//! voxbridge health [--server http://localhost:3002]
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use voxbridge_lib::server::{self, ServerConfig};

/// voxbridge — config server for the voice-assistant bridge
#[derive(Parser)]
#[command(name = "voxbridge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the config server
    Serve {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Directory of static assets to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Fetch the config a running server hands out
    Config {
        /// Server URL
        #[arg(long, default_value = "http://localhost:3002")]
        server: String,
    },
    /// Check a running server's health
    Health {
        #[arg(long, default_value = "http://localhost:3002")]
        server: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            host,
            static_dir,
        } => {
            let mut config = ServerConfig::from_env();
            config.host = host;
            if let Some(port) = port {
                config.port = port;
            }
            config.static_dir = static_dir;

            let app = server::router(&config);
            let addr = config.bind_addr();
            eprintln!("voxbridge listening on {addr}");
            eprintln!("config endpoint: http://{addr}/api/vapi-config");

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .expect("failed to bind");

            axum::serve(listener, app).await.expect("server error");
        }

        Command::Config { server } => get_simple(&server, "api/vapi-config").await,
        Command::Health { server } => get_simple(&server, "health").await,
    }
}

async fn get_simple(server: &str, endpoint: &str) {
    let resp = reqwest::Client::new()
        .get(format!("{server}/{endpoint}"))
        .send()
        .await
        .expect("request failed");
    println!("{}", resp.text().await.unwrap_or_default());
}
