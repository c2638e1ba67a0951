use channel_videos::config::Cli;
use channel_videos::fetch_channel_videos;
use channel_videos::output::{write_videos, write_videos_to_path};
use channel_videos::window::rfc3339;
use channel_videos::youtube_api::{ReqwestTransport, YouTubeClient};
use clap::Parser;
use eyre::Context;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = cli
        .settings(&jiff::Zoned::now())
        .context("interpret command-line arguments")?;

    tracing::info!(
        start = %rfc3339(settings.range.start()),
        end = %rfc3339(settings.range.end()),
        interval = %settings.interval,
        channel = ?settings.channel,
        "searching for videos"
    );

    let transport = ReqwestTransport::new(settings.timeout).context("set up HTTP client")?;
    let client = YouTubeClient::new(settings.api_key.clone(), transport)
        .with_snippets(settings.include_snippets)
        .with_max_pages_per_window(settings.max_pages_per_window);

    let videos = fetch_channel_videos(
        &client,
        &settings.channel,
        settings.range.start(),
        settings.range.end(),
        settings.interval,
    )
    .await
    .context("list channel videos")?;

    match &cli.output_file_path {
        Some(path) => write_videos_to_path(path, &videos)
            .with_context(|| format!("write videos to {}", path.display()))?,
        None => write_videos(std::io::stdout().lock(), &videos).context("write videos to stdout")?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> eyre::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env_lossy();

    match &cli.log_file_path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
