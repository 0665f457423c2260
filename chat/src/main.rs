use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use retrieval::{ChatConfig, Reply, Session};
use tracing_subscriber::{EnvFilter, fmt};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chat")]
#[command(about = "Answer questions with the closest sentence from a text document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        #[command(flatten)]
        opts: DocumentOpts,
        /// Question to answer
        #[arg(long, short)]
        query: String,
    },
    /// Read questions from stdin, one per line
    Repl {
        #[command(flatten)]
        opts: DocumentOpts,
    },
}

#[derive(Args)]
struct DocumentOpts {
    /// UTF-8 text document to answer from
    #[arg(long, short)]
    document: PathBuf,
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum similarity for an answer, in [0, 1]
    #[arg(long)]
    threshold: Option<f32>,
    /// Apply English stemming to terms
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Drop English stopwords
    #[arg(long, default_value_t = false)]
    stopwords: bool,
    /// Use tf = 1 + ln(count) instead of raw counts
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
    /// Use idf = ln(n/df) + 1 instead of the smoothed form
    #[arg(long, default_value_t = false)]
    no_smooth_idf: bool,
    /// Print the similarity score with each answer
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

impl DocumentOpts {
    fn config(&self) -> Result<ChatConfig> {
        let mut config = match &self.config {
            Some(path) => ChatConfig::load(path)?,
            None => ChatConfig::default(),
        };
        if let Some(t) = self.threshold { config.matcher.threshold = t; }
        if self.stem { config.analyzer.stem = true; }
        if self.stopwords { config.analyzer.remove_stopwords = true; }
        if self.sublinear_tf { config.weighting.sublinear_tf = true; }
        if self.no_smooth_idf { config.weighting.smooth_idf = false; }
        config.validate()?;
        Ok(config)
    }

    fn open_session(&self) -> Result<Session> {
        let config = self.config()?;
        let text = read_document(&self.document)?;
        let session = Session::open(self.document.display().to_string(), &text, &config);
        tracing::info!(document = %self.document.display(), sentences = session.sentences().len(), "document loaded");
        Ok(session)
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask { opts, query } => {
            let session = opts.open_session()?;
            let mut out = io::stdout().lock();
            print_reply(&mut out, &session.reply(&query), opts.verbose)?;
            Ok(())
        }
        Commands::Repl { opts } => {
            let session = opts.open_session()?;
            repl(&session, io::stdin().lock(), io::stdout().lock(), opts.verbose)
        }
    }
}

fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

fn repl<R: BufRead, W: Write>(session: &Session, input: R, mut out: W, verbose: bool) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        print_reply(&mut out, &session.reply(&line), verbose)?;
        out.flush()?;
    }
    Ok(())
}

fn print_reply<W: Write>(out: &mut W, reply: &Reply<'_>, verbose: bool) -> Result<()> {
    match (verbose, reply.best) {
        (true, Some(best)) => writeln!(out, "[{:.3}] {}", best.score, reply.text)?,
        _ => writeln!(out, "{}", reply.text)?,
    }
    Ok(())
}
