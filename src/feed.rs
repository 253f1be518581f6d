//! RSS 2.0 rendering of one scrape.

use std::collections::BTreeMap;

use rss::{
    ChannelBuilder, GuidBuilder, ItemBuilder,
    extension::atom::{self, AtomExtensionBuilder, Link},
};

use crate::error::Result;

const LANGUAGE: &str = "en-us";
const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// A post as found on the page. Values are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub link: String,
    pub published_at: String,
}

/// Feed-level metadata plus the records of exactly one fetch attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub built_at: String,
    pub records: Vec<Record>,
}

fn self_link(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel("self");
    link.set_mime_type(Some("application/rss+xml".to_owned()));
    link
}

fn to_item(record: &Record) -> rss::Item {
    ItemBuilder::default()
        .title(record.title.clone())
        .link(record.link.clone())
        .pub_date(record.published_at.clone())
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(record.link.clone())
                .build(),
        )
        .build()
}

/// Renders the channel as a pretty-printed RSS 2.0 document.
///
/// Links and dates are not validated; only XML text escaping is applied.
pub fn render(channel: &Channel) -> Result<String> {
    let atom_ext = AtomExtensionBuilder::default()
        .links(vec![self_link(&channel.link)])
        .build();

    let rss = ChannelBuilder::default()
        .namespaces(BTreeMap::from([(
            "atom".to_owned(),
            atom::NAMESPACE.to_owned(),
        )]))
        .title(channel.title.clone())
        .link(channel.link.clone())
        .description(format!("Recent content on {}", channel.title))
        .generator(GENERATOR.to_owned())
        .language(LANGUAGE.to_owned())
        .last_build_date(channel.built_at.clone())
        .atom_ext(atom_ext)
        .items(channel.records.iter().map(to_item).collect::<Vec<_>>())
        .build();

    let buf = rss.pretty_write_to(Vec::new(), b' ', 2)?;
    let document = String::from_utf8_lossy(&buf).into_owned();

    tracing::debug!(target: "feed", "rendered {} items, {} bytes", channel.records.len(), document.len());
    Ok(document)
}
