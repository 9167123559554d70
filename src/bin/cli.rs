//! Trackie CLI
//!
//! Command-line interface for a running Trackie API server:
//! - Show the leaderboard
//! - Show or end the signed-in session
//! - Inspect and switch the sidebar tab
//! - Check status, generate a config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trackie::api::dto::{HealthResponse, LeaderboardResponse, ProfileResponse};

#[derive(Parser)]
#[command(name = "trackie")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fitness dashboard leaderboard and profile")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the leaderboard
    Leaderboard {
        /// Only show the first N entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the signed-in user's profile
    Profile,

    /// End the signed-in session
    Logout,

    /// Show the sidebar, or select a tab
    Nav {
        /// Tab id to select (home, inbox, calendar, ...)
        tab: Option<String>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json_output = cli.format == "json";

    match cli.command {
        Commands::Leaderboard { limit } => {
            let mut request = client.get(format!("{}/api/v1/leaderboard", cli.api_url));
            if let Some(limit) = limit {
                request = request.query(&[("limit", limit)]);
            }

            let response = request.send().await.with_context(|| connect_hint(&cli.api_url))?;
            let response = ensure_success(response, "Leaderboard request").await?;

            if json_output {
                let data: serde_json::Value = response.json().await?;
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let board: LeaderboardResponse = response.json().await?;
                print_leaderboard(&board);
            }
        }

        Commands::Profile => {
            let response = client
                .get(format!("{}/api/v1/profile", cli.api_url))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                println!("Nobody is signed in.");
                return Ok(());
            }
            let response = ensure_success(response, "Profile request").await?;
            let profile: ProfileResponse = response.json().await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{}", profile.greeting);
                println!("Streak: {} day(s)", profile.streak);
            }
        }

        Commands::Logout => {
            let response = client
                .post(format!("{}/api/v1/session/logout", cli.api_url))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            ensure_success(response, "Logout").await?;
            println!("Signed out.");
        }

        Commands::Nav { tab } => {
            let request = match tab {
                Some(tab) => client
                    .put(format!("{}/api/v1/navigation/active", cli.api_url))
                    .json(&serde_json::json!({ "tab": tab })),
                None => client.get(format!("{}/api/v1/navigation", cli.api_url)),
            };

            let response = request.send().await.with_context(|| connect_hint(&cli.api_url))?;
            let response = ensure_success(response, "Navigation request").await?;
            let nav: serde_json::Value = response.json().await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&nav)?);
            } else {
                print_navigation(&nav);
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let response = ensure_success(response, "Health check").await?;
            let health: HealthResponse = response.json().await?;

            println!("Trackie v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API Status: {}", health.status);
            println!("Backend:    {}", health.backend);
            println!("Server:     v{}", health.version);
            println!("Uptime:     {}", format_duration(health.uptime_seconds));
        }

        Commands::Config { output } => {
            let content = trackie::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn connect_hint(api_url: &str) -> String {
    format!(
        "Cannot connect to Trackie API at {} (start it with: cargo run --bin trackie)",
        api_url
    )
}

async fn ensure_success(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    bail!("{} failed ({}): {}", what, status, text)
}

fn print_leaderboard(board: &LeaderboardResponse) {
    if board.entries.is_empty() {
        println!("The leaderboard is empty.");
        return;
    }

    println!("Top Performers");
    for entry in &board.podium {
        println!("  {:<7} {} ({} pts)", entry.medal.to_string(), entry.name, entry.points);
    }
    println!();

    println!(
        "{:<6} {:<20} {:>8} {:>8} {:>8} {:>8}",
        "Rank", "Name", "Squats", "Pushups", "JJs", "Points"
    );
    println!("{}", "-".repeat(63));

    for entry in &board.entries {
        let name = if entry.is_current_user {
            format!("{} (You)", entry.name)
        } else {
            entry.name.clone()
        };
        println!(
            "{:<6} {:<20} {:>8} {:>8} {:>8} {:>8}",
            entry.rank, name, entry.squats, entry.pushups, entry.jumping_jacks, entry.points
        );
    }

    if board.entries.len() < board.total {
        println!();
        println!("({} of {} shown)", board.entries.len(), board.total);
    }
}

fn print_navigation(nav: &serde_json::Value) {
    println!("{}", nav["title"].as_str().unwrap_or("Dashboard"));
    println!();

    if let Some(items) = nav["items"].as_array() {
        for item in items {
            let marker = if item["active"].as_bool().unwrap_or(false) { ">" } else { " " };
            let badge = item["badge"]
                .as_str()
                .map(|b| format!(" [{}]", b))
                .unwrap_or_default();
            println!(
                "{} {:<12} {}{}",
                marker,
                item["id"].as_str().unwrap_or("-"),
                item["label"].as_str().unwrap_or("-"),
                badge
            );
        }
    }

    if nav["active"] == "special" {
        println!();
        println!("> special");
    }
}

/// Format seconds as human-readable duration
fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
