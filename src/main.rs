use clap::Parser;
use hera::Profile;
use hera::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "hera", about = "Terminal chat client for the HERA coaching assistant")]
struct Args {
    /// Client preset (overrides config file and HERA_PROFILE)
    #[arg(short, long, value_enum)]
    profile: Option<Profile>,

    /// Backend base URL; requests go to `<base-url>/chat`
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("hera.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}; falling back to defaults");
        config::HeraConfig::default()
    });
    let resolved = config::resolve(&file_config, args.profile, args.base_url.as_deref());

    log::info!(
        "Hera starting up: profile={}, endpoint={}",
        resolved.profile.assistant_label,
        resolved.endpoint()
    );

    hera::tui::run(resolved)
}
