use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{debug, LevelFilter};
use rust_decimal::Decimal;
use tokio::fs;

use crate::api::*;
use crate::client::Client;
use crate::wager::{encode_wager, encode_winshare, parse_line, EncodedRequest};

mod api;
mod client;
mod wager;

/// Wagers grouped into a single request. Bigger baskets do not help, the
/// account debit is the bottleneck on the platform side.
const BASKET_SIZE: usize = 25;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Commands,
    /// Platform address, overridable for test environments.
    #[arg(long, default_value = "https://www.veikkaus.fi")]
    host: String,
}
#[derive(Subcommand)]
enum Commands {
    /// List the open draws of a game.
    ListDraws {
        #[arg(short, long)]
        game: Game,
    },
    /// Place one wager per input line on a draw list.
    Play {
        #[arg(short, long)]
        game: Game,
        #[arg(short, long, default_value_t = 0)]
        list_index: u32,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Input file with one board per line; # starts a comment line.
        #[arg(short = 'f', long)]
        input: PathBuf,
        /// Unit stake in cents, shared by every line. 0 queries winshares.
        #[arg(short, long, default_value_t = 0)]
        stake: u64,
        /// Double the price for the additional prize tier (sport only).
        #[arg(long)]
        double_prize_tier: bool,
    },
    /// Query the winshares for each board in the input file.
    Winshare {
        #[arg(short, long)]
        game: Game,
        #[arg(short, long, default_value_t = 0)]
        list_index: u32,
        #[arg(short = 'f', long)]
        input: PathBuf,
    },
    /// Print the cash and reserved balance of the account.
    Balance {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    let cli = Args::parse();
    let client = Client::new(cli.host)?;

    match cli.command {
        Commands::ListDraws { game } => {
            for draw in client.list_draws(game).await? {
                println!(
                    "game: {}, index: {}, draw: {}, status: {}",
                    draw.game_name, draw.brand_name, draw.id, draw.status
                );
            }
        }
        Commands::Play {
            game,
            list_index,
            username,
            password,
            input,
            stake,
            double_prize_tier,
        } => {
            client.login(&username, &password).await?;
            play(&client, game, list_index, stake, double_prize_tier, &input).await?;
            let balance = client.account_balance().await?;
            println!(
                "\n\taccount balance: {}\n\treserved funds (unconfirmed): {}",
                euros(balance.balance),
                euros(balance.frozen_balance)
            );
        }
        Commands::Winshare {
            game,
            list_index,
            input,
        } => {
            winshare(&client, game, list_index, &input).await?;
        }
        Commands::Balance { username, password } => {
            client.login(&username, &password).await?;
            let balance = client.account_balance().await?;
            println!("account balance: {}", euros(balance.balance));
            println!("reserved funds (unconfirmed): {}", euros(balance.frozen_balance));
        }
    }
    Ok(())
}

/// Encodes the input file line by line and submits wagers in baskets.
async fn play(
    client: &Client,
    game: Game,
    list_index: u32,
    stake: u64,
    double_prize_tier: bool,
    input: &Path,
) -> Result<()> {
    let mut basket = Vec::new();
    for line in read_boards(input).await? {
        match encode_wager(game, list_index, stake, parse_line(&line, game)?, double_prize_tier)? {
            EncodedRequest::Wager(wager) => {
                basket.push(wager);
                if basket.len() >= BASKET_SIZE {
                    submit_basket(client, &basket).await?;
                    basket.clear();
                }
            }
            EncodedRequest::Winshare(request) => {
                debug!("Stake is 0, querying winshares for {:?} instead", line);
                print_winshares(client, &request, list_index).await?;
            }
        }
    }
    if !basket.is_empty() {
        submit_basket(client, &basket).await?;
    }
    Ok(())
}

async fn winshare(client: &Client, game: Game, list_index: u32, input: &Path) -> Result<()> {
    for line in read_boards(input).await? {
        let request = encode_winshare(game, parse_line(&line, game)?)?;
        print_winshares(client, &request, list_index).await?;
    }
    Ok(())
}

/// Reads the input file, dropping comment and blank lines.
async fn read_boards(input: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(input)
        .await
        .with_context(|| format!("Couldn't read input file {}", input.display()))?;
    Ok(contents
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

async fn submit_basket(client: &Client, basket: &[WagerRequest]) -> Result<()> {
    let started = Instant::now();
    let placed = client.place_wagers(basket).await?;
    for wager in placed {
        match wager.status {
            WagerStatus::Accepted => {
                println!(
                    ">> ACCEPTED with serial: {}",
                    wager.serial_number.unwrap_or_default()
                );
            }
            WagerStatus::Rejected => {
                let error = wager
                    .error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!(">> REJECTED with error: {}", error);
            }
        }
    }
    println!(
        "{} - placed {} wagers in {:.3} seconds",
        Utc::now(),
        basket.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn print_winshares(client: &Client, request: &WinshareRequest, list_index: u32) -> Result<()> {
    for winshare in client.winshares(request, list_index).await? {
        let board = winshare
            .selections
            .iter()
            .map(board_marks)
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "value={},numberOfBets={},board={}",
            winshare.value, winshare.number_of_bets, board
        );
    }
    Ok(())
}

/// Compact board form for winshare rows, `1x2` marks or `0,1-2` scores.
fn board_marks(selection: &MatchSelection) -> String {
    match selection {
        MatchSelection::Outcomes { outcomes } => outcomes.iter().map(|o| o.mark()).collect(),
        MatchSelection::Scores { home, away } => {
            format!("{}-{}", join_scores(home), join_scores(away))
        }
    }
}
fn join_scores(scores: &[u32]) -> String {
    scores
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn euros(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
