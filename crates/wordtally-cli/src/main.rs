//! # `wtally` Vocabulary Tool

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use wordtally::{
    TokenRegistry,
    config::resolve_vocab_path,
    vocab::io::{LoadOptions, MalformedLinePolicy, read_registry_path},
};

/// Inspect and extend wordtally vocabulary files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the vocabulary file.
    ///
    /// Defaults to `$WORDTALLY_VOCAB_PATH`, then `data/vocabulary.yaml`.
    #[arg(long, global = true)]
    pub vocab: Option<PathBuf>,

    /// Skip malformed lines when loading, instead of failing.
    #[arg(long, global = true, default_value = "false")]
    pub skip_malformed: bool,

    /// Increase logging verbosity.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all logging.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a summary of the vocabulary.
    Stats {},

    /// Print every `(id, token, frequency)` entry.
    List {},

    /// Print the id of a token.
    Id {
        /// The token to look up.
        token: String,
    },

    /// Print the token at an id.
    Token {
        /// The id to look up.
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Register tokens, creating the vocabulary file if needed.
    Add {
        /// The tokens to register.
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Strictly validate the vocabulary file.
    Check {},
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .module(module_path!())
        .module("wordtally")
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 1)
        .init()?;

    log::debug!("{:#?}", args);

    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

fn load_options(args: &Args) -> LoadOptions {
    let policy = if args.skip_malformed {
        MalformedLinePolicy::Skip
    } else {
        MalformedLinePolicy::Reject
    };
    LoadOptions::default().with_malformed_lines(policy)
}

fn load(
    path: &Path,
    options: LoadOptions,
) -> anyhow::Result<TokenRegistry> {
    Ok(read_registry_path(path, options)?)
}

/// Run a parsed command, writing results to `out`.
pub fn run<W: Write>(
    args: &Args,
    out: &mut W,
) -> anyhow::Result<()> {
    let path = resolve_vocab_path(args.vocab.as_ref());

    match &args.command {
        Command::Stats {} => {
            let registry = load(&path, load_options(args))?;
            writeln!(out, "path: {}", path.display())?;
            writeln!(out, "tokens: {}", registry.len())?;
            match registry.total_frequency() {
                Some(total) => writeln!(out, "occurrences: {total}")?,
                None => writeln!(out, "occurrences: more than {}", u64::MAX)?,
            }
            if let Some(first) = registry.lookup_id(0) {
                writeln!(out, "first: {first:?}")?;
            }
            if let Some(last) = registry.lookup_id(registry.len().saturating_sub(1)) {
                writeln!(out, "last: {last:?}")?;
            }
        }
        Command::List {} => {
            let registry = load(&path, load_options(args))?;
            for (id, token, count) in registry.iter() {
                writeln!(out, "{id}\t{token:?}\t{count}")?;
            }
        }
        Command::Id { token } => {
            let registry = load(&path, load_options(args))?;
            match registry.lookup_token(token)? {
                Some(id) => writeln!(out, "{id}")?,
                None => anyhow::bail!("token {token:?} is not registered"),
            }
        }
        Command::Token { id } => {
            let registry = load(&path, load_options(args))?;
            match registry.lookup_id(*id) {
                Some(token) => writeln!(out, "{token:?}")?,
                None => anyhow::bail!("no token has id {id}"),
            }
        }
        Command::Add { tokens } => {
            let mut registry = if path.exists() {
                load(&path, load_options(args))?
            } else {
                log::info!("creating new vocabulary at {}", path.display());
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                TokenRegistry::new()
            };

            for token in tokens {
                let id = registry.add_token(token)?;
                writeln!(out, "{id}\t{token:?}")?;
            }

            registry.save(&path)?;
        }
        Command::Check {} => {
            let registry = load(&path, LoadOptions::default())?;
            writeln!(out, "ok: {} tokens", registry.len())?;
        }
    }

    Ok(())
}
