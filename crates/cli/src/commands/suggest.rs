//! Interactive suggestion box driven by stdin.
//!
//! One `select!` loop multiplexes three sources: input lines, the session's
//! next timer deadline, and fetch results coming back from spawned tasks.
//! Fetches are never aborted; the session discards any result that is not
//! from the latest issued ticket.

use std::future::Future;
use std::io::{self, Write};
use std::time::Instant;

use artisan_market_core::ArtisanProfile;
use artisan_market_core::filter::{category_title, filter_by_category, suggest};
use artisan_market_core::suggest::{FetchTicket, Phase, SuggestSession, Suggestion};
use artisan_market_storefront::catalog::Catalog;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::catalog::write_artisans;

/// Where the loop reads the artisans it suggests from.
trait Directory: Clone + Send + Sync + 'static {
    fn artisans(&self) -> impl Future<Output = Vec<ArtisanProfile>> + Send;
}

impl Directory for Catalog {
    fn artisans(&self) -> impl Future<Output = Vec<ArtisanProfile>> + Send {
        Self::artisans(self)
    }
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// New search box text.
    Text(String),
    /// Choose the Nth visible suggestion (1-based on the command line).
    Select(usize),
    Blur,
    Focus,
}

fn parse_line(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed.split_once(' ').unwrap_or((trimmed, "")) {
        ("/blur", _) => Input::Blur,
        ("/focus", _) => Input::Focus,
        ("/select", n) => match n.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Input::Select(n - 1),
            _ => Input::Text(line.to_string()),
        },
        _ => Input::Text(line.to_string()),
    }
}

/// Current time on the runtime clock, so paused-clock tests advance it.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Run the suggestion loop until stdin closes and no work is pending.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub async fn run(catalog: Catalog) -> io::Result<()> {
    drive(
        catalog,
        BufReader::new(tokio::io::stdin()),
        &mut io::stdout(),
    )
    .await
}

async fn drive<D: Directory>(
    directory: D,
    input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::channel::<(u64, Vec<ArtisanProfile>)>(16);
    let mut lines = input.lines();
    let mut session = SuggestSession::<ArtisanProfile>::new();
    let mut input_open = true;
    let mut outstanding = 0usize;

    loop {
        if !input_open && outstanding == 0 && session.next_deadline().is_none() {
            break;
        }

        let wake = session.next_deadline().map(tokio::time::Instant::from_std);

        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) => handle_input(&directory, &mut session, parse_line(&line), out).await?,
                None => input_open = false,
            },
            () = tokio::time::sleep_until(wake.unwrap_or_else(tokio::time::Instant::now)), if wake.is_some() => {
                if let Some(ticket) = session.poll(now()) {
                    outstanding += 1;
                    spawn_fetch(directory.clone(), ticket, tx.clone());
                }
            },
            Some((seq, results)) = rx.recv() => {
                outstanding = outstanding.saturating_sub(1);
                if !session.resolve(seq, results) {
                    tracing::debug!(seq, "Dropped stale suggestions");
                } else if session.phase() == Phase::Showing {
                    write_suggestions(out, session.query(), session.visible())?;
                } else {
                    tracing::debug!(seq, "Input changed while fetching; waiting for next fetch");
                }
            },
        }
    }

    Ok(())
}

async fn handle_input<D: Directory>(
    directory: &D,
    session: &mut SuggestSession<ArtisanProfile>,
    input: Input,
    out: &mut impl Write,
) -> io::Result<()> {
    match input {
        Input::Text(text) => session.input(&text, now()),
        Input::Blur => session.blur(now()),
        Input::Focus => session.focus(),
        Input::Select(index) => {
            let Some(chosen) = session.select(index) else {
                return writeln!(out, "No suggestion #{}", index + 1);
            };
            let category = chosen.category();
            let artisans = directory.artisans().await;
            let matched = filter_by_category(Some(category), &artisans);

            writeln!(out, "Search box: {}", session.query())?;
            write_artisans(out, &category_title(Some(category)), &matched)?;
        }
    }
    Ok(())
}

fn spawn_fetch<D: Directory>(directory: D, ticket: FetchTicket, tx: mpsc::Sender<(u64, Vec<ArtisanProfile>)>) {
    tracing::debug!(seq = ticket.seq, query = %ticket.query, "Fetching suggestions");
    tokio::spawn(async move {
        let artisans = directory.artisans().await;
        let results = suggest(&ticket.query, &artisans).into_iter().cloned().collect();
        if tx.send((ticket.seq, results)).await.is_err() {
            tracing::debug!(seq = ticket.seq, "Suggestion loop ended before fetch completed");
        }
    });
}

fn write_suggestions(out: &mut impl Write, query: &str, suggestions: &[ArtisanProfile]) -> io::Result<()> {
    if suggestions.is_empty() {
        return writeln!(out, "No suggestions for \"{query}\"");
    }
    writeln!(out, "Suggestions for \"{query}\":")?;
    for (i, artisan) in suggestions.iter().enumerate() {
        writeln!(out, "  {}. {} - {}", i + 1, artisan.name, artisan.craft_type)?;
    }
    Ok(())
}
