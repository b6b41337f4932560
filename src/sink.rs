//! Persistence of converted pages and their records as JSON lines.
//!
//! Each kind of record goes to its own file in the output directory:
//!
//! | File              | Record                                   |
//! |-------------------|------------------------------------------|
//! | `article.jsonl`   | [`Article`] page records                 |
//! | `template.jsonl`  | [`Template`] page records                |
//! | `inclusion.jsonl` | [`Inclusion`] records of article pages   |
//! | `IWL.jsonl`       | [`Link`] records of article pages        |

use crate::page::{Article, Inclusion, Link, Template};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Errors that may occur when writing records.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// An output file could not be created.
    #[error("{1}: I/O error: {0}")]
    Create(io::Error, PathBuf),

    /// A record could not be written.
    #[error("I/O error writing records: {0}")]
    Io(#[from] io::Error),

    /// A record could not be serialised.
    #[error("JSON error writing records: {0}")]
    Json(#[from] serde_json::Error),
}

/// A destination for converted pages.
pub(crate) trait Sink {
    /// Stores a batch of converted article pages together with their
    /// inclusions and links.
    fn insert_articles(&mut self, pages: &[Article]) -> Result<(), Error>;

    /// Stores a batch of converted template pages.
    fn insert_templates(&mut self, pages: &[Template]) -> Result<(), Error>;

    /// Writes out any buffered records.
    fn flush(&mut self) -> Result<(), Error>;
}

/// A stored inclusion, keyed to the page it was found on.
#[derive(Serialize)]
struct InclusionRecord<'a> {
    #[serde(flatten)]
    inclusion: &'a Inclusion,
    #[serde(rename = "WP_page_id")]
    page_id: u64,
}

/// A stored link, keyed to the page it was found on. The sentence fields are
/// filled in by a later alignment stage.
#[derive(Serialize)]
struct LinkRecord<'a> {
    #[serde(flatten)]
    link: &'a Link,
    #[serde(rename = "WP_page_id")]
    page_id: u64,
    sen_id: i64,
    start_sen: i64,
    end_sen: i64,
}

impl<'a> LinkRecord<'a> {
    fn new(page_id: u64, link: &'a Link) -> Self {
        Self {
            link,
            page_id,
            sen_id: -1,
            start_sen: -1,
            end_sen: -1,
        }
    }
}

/// A sink which writes one JSON document per line.
pub(crate) struct JsonLinesSink<W: Write> {
    /// Article page records.
    articles: W,
    /// Template page records.
    templates: W,
    /// Inclusion records.
    inclusions: W,
    /// Link records.
    links: W,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Creates (or truncates) the record files in `dir`.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let open = |name: &str| {
            let path = dir.join(name);
            File::create(&path)
                .map(BufWriter::new)
                .map_err(|err| Error::Create(err, path))
        };

        log::info!("Writing records to {}", dir.display());
        Ok(Self {
            articles: open("article.jsonl")?,
            templates: open("template.jsonl")?,
            inclusions: open("inclusion.jsonl")?,
            links: open("IWL.jsonl")?,
        })
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink from its four destinations.
    #[cfg(test)]
    pub fn new(articles: W, templates: W, inclusions: W, links: W) -> Self {
        Self {
            articles,
            templates,
            inclusions,
            links,
        }
    }

    /// Returns the destinations in the order accepted by [`Self::new`].
    #[cfg(test)]
    pub fn into_inner(self) -> (W, W, W, W) {
        (self.articles, self.templates, self.inclusions, self.links)
    }
}

/// Writes `value` to `out` as a single line of JSON.
fn write_line<W: Write>(out: &mut W, value: &impl Serialize) -> Result<(), Error> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn insert_articles(&mut self, pages: &[Article]) -> Result<(), Error> {
        log::debug!("Inserting {} articles", pages.len());
        for page in pages {
            write_line(&mut self.articles, page)?;

            let page_id = page.page.id;
            if !page.inclusions.is_empty() {
                log::debug!("Inserting {} inclusions ({page_id})", page.inclusions.len());
            }
            for inclusion in &page.inclusions {
                write_line(&mut self.inclusions, &InclusionRecord { inclusion, page_id })?;
            }

            if !page.links.is_empty() {
                log::debug!("Inserting {} links ({page_id})", page.links.len());
            }
            for link in &page.links {
                write_line(&mut self.links, &LinkRecord::new(page_id, link))?;
            }
        }
        Ok(())
    }

    fn insert_templates(&mut self, pages: &[Template]) -> Result<(), Error> {
        log::debug!("Inserting {} templates", pages.len());
        for page in pages {
            write_line(&mut self.templates, page)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.articles.flush()?;
        self.templates.flush()?;
        self.inclusions.flush()?;
        self.links.flush()?;
        Ok(())
    }
}
