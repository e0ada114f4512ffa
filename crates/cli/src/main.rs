//! Command Line Interface for the subgraph analytics MCP server.
use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};

use subgraph_mcp_data::{PositionSource, SubgraphClient, SubgraphConfig};
use subgraph_mcp_domain::PoolAnalytics;
use subgraph_mcp_server::{McpServer, serve_http, serve_stdio};

#[derive(Parser)]
#[command(name = "subgraph-mcp")]
#[command(about = "Uniswap v3 subgraph analytics over MCP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdio (default) or HTTP
    Serve {
        /// Serve JSON-RPC on this address instead of stdio
        #[arg(long)]
        http: Option<SocketAddr>,
    },
    /// Fetch positions once and print them as a table
    Positions {
        /// Positions to request
        #[arg(short, long, default_value_t = 10)]
        first: u32,
    },
    /// Fetch positions once and print pool analytics
    Analytics {
        /// Positions to request
        #[arg(short, long, default_value_t = 10)]
        first: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Stdout carries protocol frames in serve mode; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { http } => {
            let config = SubgraphConfig::from_env()?;
            let server = McpServer::new(SubgraphClient::new(&config));
            match http {
                Some(addr) => serve_http(server, addr).await?,
                None => serve_stdio(server).await?,
            }
        }
        Commands::Positions { first } => {
            let config = SubgraphConfig::from_env()?.with_page_size(first);
            let client = SubgraphClient::new(&config);

            println!("🔍 Fetching up to {first} positions...");
            let positions = client.fetch_positions().await?;
            println!("✅ Fetched {} positions:", positions.len());

            let mut table = Table::new();
            table.add_row(row![
                "Token0",
                "Token1",
                "Tx Count",
                "TVL (USD)",
                "Volume (USD)"
            ]);
            for position in &positions {
                table.add_row(row![
                    position.token0,
                    position.token1,
                    position.tx_count,
                    position.total_value_locked_usd,
                    position.volume_usd,
                ]);
            }
            table.printstd();
        }
        Commands::Analytics { first } => {
            let config = SubgraphConfig::from_env()?.with_page_size(first);
            let client = SubgraphClient::new(&config);

            println!("🔍 Fetching up to {first} positions...");
            let positions = client.fetch_positions().await?;
            let analytics = PoolAnalytics::from_positions(&positions)?;

            println!("\n📊 Pool Analytics");
            println!("════════════════════════════════════");
            println!("Positions:       {}", positions.len());
            println!("Total Liquidity: ${}", analytics.total_liquidity);
            println!("Total Volume:    ${}", analytics.total_volume);
            println!("Tx Count:        {}", analytics.tx_count);
            println!("Average Price:   {}", analytics.average_price);
            println!("Average Volume:  ${}", analytics.average_volume);
            println!("════════════════════════════════════");
        }
    }

    Ok(())
}
