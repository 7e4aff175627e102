use clap::Parser;
use ghostwrite::LogLevel;
use ghostwrite::core::config::{self, CliOverrides, GhostwriteConfig};
use ghostwrite::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "ghostwrite", about = "Inline ghost-text suggestions while you type")]
struct Args {
    /// Subject sent as context with every suggestion request
    #[arg(short, long)]
    subject: Option<String>,

    /// Base URL of the autocomplete service
    #[arg(long)]
    service_url: Option<String>,

    /// Milliseconds between drift checks
    #[arg(long)]
    resync_ms: Option<u64>,

    /// Log verbosity for ghostwrite.log
    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,
}

/// Ask for the subject on stdin before the composer takes over the terminal.
fn prompt_subject() -> io::Result<String> {
    print!("Subject: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ghostwrite.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("ghostwrite.log") {
        let _ = WriteLogger::init(args.log_level.into(), log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        GhostwriteConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            service_url: args.service_url,
            subject: args.subject,
            resync_ms: args.resync_ms,
        },
    );
    log::info!("Ghostwrite starting up against {}", resolved.service_url);

    let subject = match resolved.subject.clone() {
        Some(subject) => subject,
        None => prompt_subject()?,
    };

    if let Some(body) = tui::run(&resolved, subject).await? {
        let width = crossterm::terminal::size()
            .map(|(cols, _)| usize::from(cols))
            .unwrap_or(80);
        println!("Final body:\n{}", textwrap::fill(&body, width));
    }
    Ok(())
}
