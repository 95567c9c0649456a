//! Interactive translation session on stdin/stdout.
//!
//! Plain lines become input text; colon commands drive the rest of the
//! session. The suggest worker runs as in a GUI frontend, except the
//! loop blocks briefly after each submission instead of polling.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use unicode_width::UnicodeWidthStr;

use fanyi_core::settings::Settings;
use fanyi_session::worker::SuggestWorker;
use fanyi_session::{SessionConfig, SessionResponse, SuggestAction, TranslationSession};

use crate::client::ApiClient;
use crate::commands::pad_to;

const RESULT_GRACE: Duration = Duration::from_millis(200);

enum Command<'a> {
    Quit,
    Help,
    Swap,
    Reload,
    List,
    Page(usize),
    Pick(usize),
    Input(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Input(trimmed);
    };
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q") | Some("quit"), _) => Command::Quit,
        (Some("swap"), _) => Command::Swap,
        (Some("reload"), _) => Command::Reload,
        (Some("list"), _) => Command::List,
        (Some("page"), Some(n)) => n.parse().map(Command::Page).unwrap_or(Command::Help),
        (Some("pick"), Some(n)) => n.parse().map(Command::Pick).unwrap_or(Command::Help),
        _ => Command::Help,
    }
}

pub fn run(client: &ApiClient, settings: &Settings) {
    let book = client.fetch_book_or_builtin();
    let mut session = TranslationSession::new(Arc::new(book), SessionConfig::from(settings));
    let debounce = Duration::from_millis(settings.suggest.debounce_ms);
    let worker = SuggestWorker::new(debounce, settings.suggest.limit);

    println!("fanyi repl, :help for commands");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}→{}> ", session.source(), session.target());
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::List => print_page(&session),
            Command::Page(page) => {
                session.set_page(page);
                print_page(&session);
            }
            Command::Swap => {
                let resp = session.swap_languages();
                pump(&mut session, &worker, debounce, resp);
                print_state(&session);
            }
            Command::Reload => {
                let book = client.fetch_book_or_builtin();
                println!("loaded {} entries", book.len());
                let resp = session.replace_book(Arc::new(book));
                pump(&mut session, &worker, debounce, resp);
                print_state(&session);
            }
            Command::Pick(n) => match session.select_suggestion(n.saturating_sub(1)) {
                Some(resp) => {
                    pump(&mut session, &worker, debounce, resp);
                    println!("> {}", session.input_text());
                    print_state(&session);
                }
                None => println!("no suggestion {n}"),
            },
            Command::Input(text) => {
                if text.is_empty() {
                    continue;
                }
                let resp = session.set_input_text(text);
                pump(&mut session, &worker, debounce, resp);
                print_state(&session);
            }
        }
    }
}

/// Forward a session response to the worker, then wait out the debounce
/// for the refreshed list so the next prompt shows current suggestions.
fn pump(
    session: &mut TranslationSession,
    worker: &SuggestWorker,
    debounce: Duration,
    resp: SessionResponse,
) {
    if matches!(resp.suggestions, SuggestAction::Clear) {
        worker.invalidate();
    }
    let Some(request) = resp.suggest_request else {
        return;
    };
    worker.submit(request);
    if let Some(result) = worker.recv_timeout(debounce + RESULT_GRACE) {
        session.receive_suggestions(&result.input, result.suggestions);
    }
}

fn print_state(session: &TranslationSession) {
    if session.output_text().is_empty() {
        println!("(no exact match)");
    } else {
        println!("= {}", session.output_text());
    }
    for alt in session.alternatives() {
        println!("  also: {} ({})", alt.text, alt.translation);
    }
    for (i, hit) in session.suggestions().iter().enumerate() {
        println!("  {}) {} → {}", i + 1, hit.text, hit.translation);
    }
}

fn print_page(session: &TranslationSession) {
    let items = session.page_items();
    if items.is_empty() {
        println!("(empty)");
        return;
    }
    let width = items
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(*key))
        .max()
        .unwrap_or(0);
    for (key, value) in &items {
        println!("{}  {}", pad_to(key, width), value);
    }
    let window: Vec<String> = session
        .page_window()
        .into_iter()
        .map(|page| {
            if page == session.current_page() {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    println!("---");
    println!("pages: {}", window.join(" "));
}

fn print_help() {
    println!("  <text>      translate and suggest");
    println!("  :pick N     take suggestion N");
    println!("  :swap       swap languages, carrying the output over");
    println!("  :list       show the current dictionary page");
    println!("  :page N     jump to page N");
    println!("  :reload     refetch the dictionary from the server");
    println!("  :quit       exit");
}
