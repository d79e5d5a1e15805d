use std::time::Duration;

use anyhow::Context;
use chrono::{Local, Utc};
use clap::Parser;
use football_streams::{FilterKey, MatchListView, StreamedClient, DEFAULT_BASE_URL};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Browse football matches and their stream links from streamed.su.
#[derive(Parser, Debug)]
#[command(name = "football-streams", version, about)]
struct Args {
    /// Initial filter: all, live, upcoming or popular.
    #[arg(long, default_value_t = FilterKey::All)]
    filter: FilterKey,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Render one page and exit.
    #[arg(long)]
    once: bool,

    /// Print the match list as JSON instead of cards.
    #[arg(long)]
    json: bool,

    /// Show kickoff times in UTC rather than local time.
    #[arg(long)]
    utc: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("building http client")?;
    let client = StreamedClient::with_client(http).with_base_url(&args.base_url);

    if args.json {
        let matches = client.fetch_matches(args.filter).await?;
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    let mut view = MatchListView::new(args.filter);
    let ticket = view.mount();
    view.load(&client, ticket).await;
    print_page(&view, &client, args.utc);
    if args.once {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("filter [all/live/upcoming/popular, q to quit]> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("q") {
            break;
        }
        match input.parse::<FilterKey>() {
            Ok(filter) => {
                if let Some(ticket) = view.select_filter(filter) {
                    print_page(&view, &client, args.utc);
                    view.load(&client, ticket).await;
                }
                print_page(&view, &client, args.utc);
            }
            Err(_) => eprintln!("unknown filter `{input}`"),
        }
    }
    Ok(())
}

fn print_page(view: &MatchListView, client: &StreamedClient, utc: bool) {
    let page = if utc {
        view.render(client.base_url(), &Utc)
    } else {
        view.render(client.base_url(), &Local)
    };
    println!("⚽ Football Streams\n\n{page}\n");
}
