use clap::Parser;
use merkle_chat::core::config::{self, ChatConfig, CliOverrides};
use merkle_chat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "merkle-chat", about = "Chat with a document in the terminal")]
struct Args {
    /// Document to preselect on the upload form
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Shell command that prints recognized speech, one result per line
    #[arg(long)]
    speech_command: Option<String>,

    /// Recognition locale passed to the speech command
    #[arg(long)]
    locale: Option<String>,

    /// Where to write the log
    #[arg(long, default_value = "merkle-chat.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Merkle chat starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        ChatConfig::default()
    });
    let cli = CliOverrides {
        speech_command: args.speech_command,
        locale: args.locale,
        file: args.file,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::debug!("Resolved config: {:?}", resolved);

    tui::run(resolved)
}
