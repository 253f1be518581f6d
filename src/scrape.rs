use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::{
    config::Selectors,
    error::{Error, Result},
    feed::Record,
};

pub fn basic(user_agent: &str) -> reqwest::Result<Client> {
    Client::builder().user_agent(user_agent).build()
}

/// Issues a single GET. Transport failures and non-success statuses are
/// both reported as [`Error::Fetch`]; nothing is retried.
pub async fn fetch(client: &Client, url: &str) -> Result<String> {
    tracing::info!(target: "fetch", "GET {url}");

    let res = client.get(url).send().await?.error_for_status()?;
    let body = res.text().await?;

    tracing::debug!(target: "fetch", "{url}: {} bytes", body.len());
    Ok(body)
}

struct Compiled {
    item: Selector,
    title: Selector,
    link: Selector,
    published: Selector,
}

impl Compiled {
    fn new(selectors: &Selectors) -> Result<Self> {
        fn compile(css: &'static str) -> Result<Selector> {
            Selector::parse(css).map_err(|_| Error::Selector(css))
        }

        Ok(Self {
            item: compile(selectors.item)?,
            title: compile(selectors.title)?,
            link: compile(selectors.link.0)?,
            published: compile(selectors.published.0)?,
        })
    }
}

fn first_attr(element: ElementRef<'_>, selector: &Selector, name: &str) -> String {
    element
        .select(selector)
        .next()
        .and_then(|e| e.attr(name))
        .unwrap_or_default()
        .to_owned()
}

/// One record per item block, in document order. Missing fields are empty.
pub fn parse(html: &str, selectors: &Selectors) -> Result<Vec<Record>> {
    let sel = Compiled::new(selectors)?;
    let document = Html::parse_document(html);

    let records = document
        .select(&sel.item)
        .map(|item| Record {
            title: item
                .select(&sel.title)
                .next()
                .map(|t| t.text().collect::<String>().trim().to_owned())
                .unwrap_or_default(),
            link: first_attr(item, &sel.link, selectors.link.1),
            published_at: first_attr(item, &sel.published, selectors.published.1),
        })
        .collect::<Vec<_>>();

    tracing::info!(target: "fetch", "extracted {} items", records.len());
    Ok(records)
}

pub async fn extract(client: &Client, url: &str, selectors: &Selectors) -> Result<Vec<Record>> {
    let body = fetch(client, url).await?;
    parse(&body, selectors)
}
