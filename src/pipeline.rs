use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Config,
    error::{Error, Result},
    feed::{self, Channel},
    scrape, store, util,
};

#[derive(Debug)]
pub enum Outcome {
    /// The feed file was replaced. `fetch_error` is set when the page could
    /// not be retrieved and the feed went out with no records.
    Written {
        records: usize,
        fetch_error: Option<Error>,
    },
    /// The run ended before the feed file was touched.
    Abandoned(Error),
}

impl Outcome {
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Fetch, render and write, once per call.
pub struct Pipeline {
    config: Arc<Config>,
    client: Client,
}

impl Pipeline {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = scrape::basic(config.user_agent)?;
        Ok(Self { config, client })
    }

    /// Errors are logged and reported in the [`Outcome`], never propagated.
    pub async fn run(&self) -> Outcome {
        let source = &self.config.source;
        let built_at = util::build_time();

        let (records, fetch_error) =
            match scrape::extract(&self.client, &source.url, &source.selectors).await {
                Ok(r) => (r, None),
                Err(e) => {
                    tracing::warn!(target: "pipeline", "{}: {e}", source.url);
                    (Vec::new(), Some(e))
                }
            };

        let channel = Channel {
            title: source.title.clone(),
            link: source.url.clone(),
            built_at,
            records,
        };

        let document = match feed::render(&channel) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(target: "pipeline", "{e}");
                return Outcome::Abandoned(e);
            }
        };

        let path = self.config.feed_path();
        if let Err(e) = store::write_async(path.clone(), document).await {
            tracing::error!(target: "pipeline", "{e}");
            return Outcome::Abandoned(e);
        }

        tracing::info!(
            target: "pipeline",
            "\x1b[36m{} items -> {}\x1b[0m",
            channel.records.len(),
            path.display()
        );
        Outcome::Written {
            records: channel.records.len(),
            fetch_error,
        }
    }
}
