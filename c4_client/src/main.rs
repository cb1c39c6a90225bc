//! Console Connect4 client.
//!
//! Joins a game on a remote server and polls it until the game ends, or
//! runs a two-player hot-seat game in-process with `--local`.

use anyhow::{Context, Result};
use c4_client::{api_client::ApiClient, commands::ConsoleColumns, remote::RemotePlayer};
use connect4::{
    Coordinator, GameActor, GameConfig,
    entities::{Outcome, PlayerId},
    player::LocalPlayer,
};
use pico_args::Arguments;
use std::time::Duration;

const HELP: &str = "\
Play Connect4 from the console

USAGE:
  c4_client [OPTIONS]

OPTIONS:
  --server URL          Server URL                [default: http://127.0.0.1:5000]
  --poll-ms N           Status polling interval   [default: env C4_POLL_MS or 1000]
  --player-id ID        Identifier to register    [default: random UUID]

FLAGS:
  --local               Two players on this console, no server
  -h, --help            Print help information
";

const DEFAULT_POLL_MS: u64 = 1000;

struct Args {
    server_url: String,
    poll_interval: Duration,
    player_id: PlayerId,
    local: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let poll_ms = match pargs.opt_value_from_str::<_, u64>("--poll-ms")? {
        Some(ms) => ms,
        None => match std::env::var("C4_POLL_MS") {
            Ok(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid C4_POLL_MS {value:?}"))?,
            Err(_) => DEFAULT_POLL_MS,
        },
    };

    let args = Args {
        server_url: pargs
            .opt_value_from_str("--server")?
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string()),
        poll_interval: Duration::from_millis(poll_ms),
        player_id: pargs
            .opt_value_from_str::<_, String>("--player-id")?
            .map(|id| PlayerId::parse(&id).with_context(|| format!("Invalid --player-id {id:?}")))
            .transpose()?
            .unwrap_or_else(PlayerId::random),
        local: pargs.contains("--local"),
    };

    if args.local {
        run_local(args).await
    } else {
        run_remote(args).await
    }
}

async fn run_remote(args: Args) -> Result<()> {
    let api = ApiClient::new(args.server_url);
    println!("Joining {} as {}...", api.base_url(), args.player_id);

    let mut player = RemotePlayer::new(args.player_id, api, ConsoleColumns);
    let status = Coordinator::new(args.poll_interval)
        .run(&mut player)
        .await?;

    log::info!("Game finished after {} turns", status.turn_number);
    Ok(())
}

async fn run_local(args: Args) -> Result<()> {
    let game = GameActor::spawn(&GameConfig::default());
    let mut first = LocalPlayer::new(PlayerId::new("player-1"), game.clone(), ConsoleColumns);
    let mut second = LocalPlayer::new(PlayerId::new("player-2"), game.clone(), ConsoleColumns);

    let status = Coordinator::new(args.poll_interval)
        .run_hot_seat(&mut first, &mut second)
        .await?;

    if let Some(Outcome::Winner(mark)) = status.outcome() {
        log::info!("{} won after {} turns", mark, status.turn_number);
    }
    game.close().await?;
    Ok(())
}
