//! Command-line configuration.

use crate::error::{Error, Result};
use crate::window::{DateRange, Interval};
use clap::{ArgGroup, Parser};
use jiff::civil::Date;
use jiff::{Span, Zoned};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// How far back to go when no `--date-to` is given.
const DEFAULT_LOOKBACK_WEEKS: i64 = 4;

#[derive(Parser, Debug)]
#[command(name = "channel-videos")]
#[command(about = "Find all videos published by a YouTube channel within a date range")]
#[command(version)]
#[command(group(ArgGroup::new("target").required(true).args(["channel", "channel_id"])))]
pub struct Cli {
    /// YouTube Data API key. You can get one at https://console.developers.google.com
    #[arg(short = 'k', long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Username of the channel to get videos from
    #[arg(short, long)]
    pub channel: Option<String>,

    /// ID of the channel to get videos from (skips the username lookup)
    #[arg(long)]
    pub channel_id: Option<String>,

    /// Videos published after this date (yyyy-mm-dd) are not retrieved [default: now]
    #[arg(short = 'x', long)]
    pub date_from: Option<Date>,

    /// Videos published before this date (yyyy-mm-dd) are not retrieved [default: four weeks
    /// before --date-from]
    #[arg(short = 'y', long)]
    pub date_to: Option<Date>,

    /// Longest period of time (in days) to search at once. The API stops returning results
    /// after about 500 per query, so busy channels need a shorter interval.
    #[arg(
        short,
        long,
        default_value_t = Interval::DEFAULT_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub interval: u32,

    /// File to write the found videos to as JSON (replaced each time) [default: stdout]
    #[arg(short, long)]
    pub output_file_path: Option<PathBuf>,

    /// File to write the logs to (replaced each time) [default: stderr]
    #[arg(short, long)]
    pub log_file_path: Option<PathBuf>,

    /// Only print out results, or fatal errors
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,

    /// Print out progress information, such as the windows being searched
    #[arg(short, long, conflicts_with = "debug")]
    pub verbose: bool,

    /// Print out all the gory details, including every request
    #[arg(short, long)]
    pub debug: bool,

    /// Include each video's snippet (title, description, thumbnails, ...) in the output
    #[arg(long)]
    pub snippet: bool,

    /// Fail instead of fetching more than this many pages for a single interval
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages_per_window: Option<u32>,

    /// Seconds to wait for a single API request before giving up
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

/// Which channel to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSelector {
    /// A legacy username, looked up with `channels.list?forUsername=`.
    Username(String),
    /// A channel ID, used as-is.
    Id(String),
}

/// Everything needed to run a fetch, with defaults applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub channel: ChannelSelector,
    pub range: DateRange,
    pub interval: Interval,
    pub include_snippets: bool,
    pub max_pages_per_window: Option<u32>,
    pub timeout: Duration,
}

impl Cli {
    /// Resolves the arguments into [`Settings`], taking `now` (and its time zone) as the
    /// reference for default and command-line dates.
    ///
    /// Dates given on the command line mean midnight at the start of that day.
    pub fn settings(&self, now: &Zoned) -> Result<Settings> {
        let channel = match (&self.channel_id, &self.channel) {
            (Some(id), _) => ChannelSelector::Id(id.clone()),
            (None, Some(name)) => ChannelSelector::Username(name.clone()),
            (None, None) => return Err(Error::MissingChannel),
        };

        let start = match self.date_from {
            Some(date) => date.to_zoned(now.time_zone().clone())?,
            None => now.clone(),
        };
        let end = match self.date_to {
            Some(date) => date.to_zoned(now.time_zone().clone())?,
            None => start.checked_sub(Span::new().weeks(DEFAULT_LOOKBACK_WEEKS))?,
        };

        Ok(Settings {
            api_key: self.api_key.clone(),
            channel,
            range: DateRange::new(start, end)?,
            interval: Interval::from_days(self.interval)?,
            include_snippets: self.snippet,
            max_pages_per_window: self.max_pages_per_window,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// The log level selected by `--quiet`, `--verbose` or `--debug`.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else if self.verbose {
            LevelFilter::INFO
        } else if self.quiet {
            LevelFilter::ERROR
        } else {
            LevelFilter::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::rfc3339;
    use jiff::civil::date;
    use jiff::tz::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> Zoned {
        date(2023, 3, 15)
            .at(13, 45, 10, 0)
            .to_zoned(TimeZone::fixed(jiff::tz::offset(1)))
            .unwrap()
    }

    fn parse(args: &[&str]) -> Result<Settings> {
        let cli = Cli::try_parse_from(["channel-videos", "-k", "key"].iter().chain(args)).unwrap();
        cli.settings(&now())
    }

    #[test]
    fn defaults_to_the_last_four_weeks() {
        let settings = parse(&["-c", "somebody"]).unwrap();

        assert_eq!(settings.api_key, "key");
        assert_eq!(
            settings.channel,
            ChannelSelector::Username("somebody".to_string())
        );
        assert_eq!(rfc3339(settings.range.start()), "2023-03-15T13:45:10+01:00");
        assert_eq!(rfc3339(settings.range.end()), "2023-02-15T13:45:10+01:00");
        assert_eq!(settings.interval.days(), 28);
        assert!(!settings.include_snippets);
        assert_eq!(settings.max_pages_per_window, None);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_dates_are_local_midnight() {
        let settings = parse(&[
            "--channel-id",
            "UC123",
            "-x",
            "2023-02-01",
            "-y",
            "2023-01-01",
            "-i",
            "10",
        ])
        .unwrap();

        assert_eq!(settings.channel, ChannelSelector::Id("UC123".to_string()));
        assert_eq!(rfc3339(settings.range.start()), "2023-02-01T00:00:00+01:00");
        assert_eq!(rfc3339(settings.range.end()), "2023-01-01T00:00:00+01:00");
        assert_eq!(settings.interval.days(), 10);
    }

    #[test]
    fn date_to_defaults_relative_to_date_from() {
        let settings = parse(&["-c", "somebody", "-x", "2022-12-25"]).unwrap();
        assert_eq!(rfc3339(settings.range.end()), "2022-11-27T00:00:00+01:00");
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let err = parse(&["-c", "somebody", "-x", "2023-01-01", "-y", "2023-02-01"]).unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange { .. }), "{err:?}");
    }

    #[test]
    fn a_channel_is_required() {
        assert!(Cli::try_parse_from(["channel-videos", "-k", "key"]).is_err());
        assert!(
            Cli::try_parse_from([
                "channel-videos",
                "-k",
                "key",
                "-c",
                "a",
                "--channel-id",
                "b"
            ])
            .is_err()
        );
    }

    #[test]
    fn zero_day_interval_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["channel-videos", "-k", "key", "-c", "a", "-i", "0"]).is_err());
    }

    #[test]
    fn zero_timeout_and_page_ceiling_are_rejected_by_the_parser() {
        let parse = |flags: &[&str]| {
            Cli::try_parse_from(["channel-videos", "-k", "key", "-c", "a"].iter().chain(flags))
        };
        assert!(parse(&["--timeout-secs", "0"]).is_err());
        assert!(parse(&["--max-pages-per-window", "0"]).is_err());
        assert_eq!(
            parse(&["--timeout-secs", "1", "--max-pages-per-window", "1"])
                .unwrap()
                .max_pages_per_window,
            Some(1)
        );
    }

    #[test]
    fn settings_without_a_channel_is_an_error() {
        let mut cli = Cli::try_parse_from(["channel-videos", "-k", "key", "-c", "a"]).unwrap();
        cli.channel = None;

        let err = cli.settings(&now()).unwrap_err();
        assert!(matches!(err, Error::MissingChannel), "{err:?}");
    }

    #[test]
    fn verbosity_flags() {
        let level = |flags: &[&str]| {
            Cli::try_parse_from(["channel-videos", "-k", "key", "-c", "a"].iter().chain(flags))
                .map(|cli| cli.log_level())
        };
        assert_eq!(level(&[]).unwrap(), LevelFilter::WARN);
        assert_eq!(level(&["-q"]).unwrap(), LevelFilter::ERROR);
        assert_eq!(level(&["-v"]).unwrap(), LevelFilter::INFO);
        assert_eq!(level(&["-d"]).unwrap(), LevelFilter::DEBUG);
        assert!(level(&["-q", "-v"]).is_err());
        assert!(level(&["-v", "-d"]).is_err());
    }

    #[test]
    fn optional_fetch_knobs() {
        let settings = parse(&[
            "-c",
            "a",
            "--snippet",
            "--max-pages-per-window",
            "10",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert!(settings.include_snippets);
        assert_eq!(settings.max_pages_per_window, Some(10));
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }
}
