//! Failure kinds of a feed run and of process startup.

use std::{io, net::SocketAddr, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Network or transport failure while retrieving the source page,
    /// including a non-success status.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The feed document could not be serialised.
    #[error("feed template error: {0}")]
    Template(#[from] rss::Error),

    /// A compile-time selector does not parse.
    #[error("invalid selector `{0}`")]
    Selector(&'static str),

    #[error("io error on `{path}`: {1}", path = .0.display())]
    Io(PathBuf, #[source] io::Error),

    /// The HTTP listener could not be started.
    #[error("unable to bind {0}: {1}")]
    Bind(SocketAddr, #[source] io::Error),

    #[error("unable to set schedule `{0}`: {1}")]
    Schedule(String, #[source] cron::error::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
