use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use fanyi_cli::client::{self, ApiClient};
use fanyi_cli::commands::{phrase_ops, repl};
use fanyi_core::settings::Settings;

#[derive(Parser)]
#[command(name = "fanyitool", about = "Fanyi phrase translation tool")]
struct Cli {
    /// Base URL of the translation server
    #[arg(long, default_value = client::DEFAULT_SERVER)]
    server: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a phrase (exact match)
    Translate {
        /// Phrase to translate
        text: String,
        /// Translate Chinese to English instead of English to Chinese
        #[arg(long)]
        from_chinese: bool,
        /// Read a local CSV store instead of the server
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Show fuzzy suggestions for a partial phrase
    Suggest {
        /// Partial phrase
        text: String,
        /// Match against Chinese phrases instead of English
        #[arg(long)]
        from_chinese: bool,
        /// Number of suggestions to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
        /// Read a local CSV store instead of the server
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Add a phrase pair through the server
    Add {
        /// English phrase
        english: String,
        /// Chinese phrase
        chinese: String,
        /// Append to a local CSV store instead of calling the server
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// List dictionary entries page by page
    List {
        /// List Chinese to English instead of English to Chinese
        #[arg(long)]
        from_chinese: bool,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Entries per page
        #[arg(long, default_value = "10")]
        per_page: usize,
        /// Read a local CSV store instead of the server
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Interactive translation session
    Repl {
        /// Path to a settings TOML file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server);

    match cli.command {
        Command::Translate {
            text,
            from_chinese,
            store,
        } => phrase_ops::translate(&client, store.as_deref(), &text, from_chinese),
        Command::Suggest {
            text,
            from_chinese,
            limit,
            store,
        } => phrase_ops::suggest(&client, store.as_deref(), &text, from_chinese, limit),
        Command::Add {
            english,
            chinese,
            store,
        } => match store {
            Some(path) => phrase_ops::add_local(&path, &english, &chinese),
            None => phrase_ops::add(&client, &english, &chinese),
        },
        Command::List {
            from_chinese,
            page,
            per_page,
            store,
        } => phrase_ops::list(&client, store.as_deref(), from_chinese, page, per_page),
        Command::Repl { config } => {
            let settings = match config {
                Some(path) => Settings::load(&path).unwrap_or_else(|e| {
                    eprintln!("Failed to load settings from {}: {}", path.display(), e);
                    process::exit(1);
                }),
                None => Settings::embedded_defaults(),
            };
            repl::run(&client, &settings);
        }
    }
}
