use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

/// File name of the generated feed inside the served directory.
pub const FEED_FILE: &str = "rss.xml";

pub mod constants {
    macro_rules! env_or_default {
        ($name:expr, $default:expr) => {
            if let Some(s) = option_env!($name) {
                s
            } else {
                $default
            }
        };
    }

    pub const LISTEN: &str = env_or_default!("FEED_LISTEN", "0.0.0.0:3786");
    pub const USER_AGENT: &str = env_or_default!(
        "FEED_USER_AGENT",
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
    );

    /// Seconds, minutes, hours, day of month, month, day of week.
    pub const SCHEDULE: &str = "0 32 8,12,16,20 * * *";

    pub const SOURCE_URL: &str = "https://dev.to/top/week";
    pub const SOURCE_TITLE: &str = "dev.to - top of the week";
}

#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Directory the feed is written to and served from
    #[arg(long, value_name = "DIR")]
    pub serve: PathBuf,
}

/// CSS selectors describing where a post lives in the source page.
///
/// `link` and `published` name an element and the attribute read from it.
#[derive(Clone, Copy, Debug)]
pub struct Selectors {
    pub item: &'static str,
    pub title: &'static str,
    pub link: (&'static str, &'static str),
    pub published: (&'static str, &'static str),
}

impl Selectors {
    pub const DEV_TO: Self = Self {
        item: ".crayons-story",
        title: ".crayons-story__title",
        link: ("a", "href"),
        published: ("time", "datetime"),
    };
}

#[derive(Clone, Debug)]
pub struct Source {
    pub url: String,
    pub title: String,
    pub selectors: Selectors,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            url: constants::SOURCE_URL.to_owned(),
            title: constants::SOURCE_TITLE.to_owned(),
            selectors: Selectors::DEV_TO,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub serve_dir: PathBuf,
    pub source: Source,
    pub schedule: &'static str,
    pub listen: SocketAddr,
    pub user_agent: &'static str,
}

const DEFAULT_LISTEN: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3786);

fn listen_addr(value: &str) -> SocketAddr {
    value.parse().unwrap_or_else(|e| {
        tracing::warn!(target: "config", "bad FEED_LISTEN {value:?}: {e}, using {DEFAULT_LISTEN}");
        DEFAULT_LISTEN
    })
}

impl Config {
    pub fn new(serve_dir: PathBuf) -> Self {
        Self {
            serve_dir,
            source: Source::default(),
            schedule: constants::SCHEDULE,
            listen: listen_addr(constants::LISTEN),
            user_agent: constants::USER_AGENT,
        }
    }

    pub fn from_args(args: Args) -> Self {
        Self::new(args.serve)
    }

    pub fn feed_path(&self) -> PathBuf {
        self.serve_dir.join(FEED_FILE)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_serve_flag() {
        let args = Args::try_parse_from(["feedscraper", "--serve", "/srv/feed"]).unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.serve_dir, PathBuf::from("/srv/feed"));
        assert_eq!(config.feed_path(), PathBuf::from("/srv/feed/rss.xml"));
    }

    #[test]
    fn test_serve_flag_required() {
        assert!(Args::try_parse_from(["feedscraper"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("."));
        assert_eq!(config.source.url, "https://dev.to/top/week");
        assert_eq!(config.schedule, "0 32 8,12,16,20 * * *");
        assert_eq!(config.listen.port(), 3786);
    }

    #[test]
    fn test_listen_addr() {
        assert_eq!(listen_addr("127.0.0.1:8080"), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(listen_addr(":3786"), DEFAULT_LISTEN);
        assert_eq!(listen_addr("localhost"), DEFAULT_LISTEN);
    }
}
