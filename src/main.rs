use clap::Parser;
use tokio::net::TcpListener;

use seastrike::connection::in_memory;
use seastrike::protocol::{ClientMessage, ServerMessage};
use seastrike::{bot, default_grid, init_logging, Server, DEFAULT_BIND};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Host the match server.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible matches (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play a full scripted match between two local clients.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible matches (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, seed } => {
            let listener = TcpListener::bind(&bind).await?;
            println!("Server running on {}", listener.local_addr()?);
            let server = Server::new(default_grid(), seed);
            server.run(listener).await?;
        }
        Commands::Local { seed } => {
            println!("Starting local scripted match...");
            if let Some(s) = seed {
                println!("Using fixed seed: {} (match will be reproducible)", s);
            }
            let spec = default_grid();
            let server = Server::new(spec, seed);

            let (server_end1, client_end1) = in_memory::pair::<ServerMessage, ClientMessage>();
            let (server_end2, client_end2) = in_memory::pair::<ServerMessage, ClientMessage>();

            let (sink1, source1) = server_end1.split();
            let (sink2, source2) = server_end2.split();
            tokio::spawn(server.clone().serve_connection(sink1, source1));
            tokio::spawn(server.clone().serve_connection(sink2, source2));

            let (csink1, csource1) = client_end1.split();
            let (csink2, csource2) = client_end2.split();
            let (report1, report2) = tokio::try_join!(
                bot::run_scripted(csink1, csource1, spec),
                bot::run_scripted(csink2, csource2, spec),
            )?;

            for report in [report1, report2] {
                let result = if report.won { "won" } else { "lost" };
                println!(
                    "player {} {} after {} attacks",
                    report.client_id, result, report.attacks
                );
            }
        }
    }
    Ok(())
}
