//! Types and functions for reading a MediaWiki XML export, either plain or
//! bzip2-compressed.

use crate::page::Page;
use bzip2_rs::DecoderReader;
use memmap2::Mmap;
use minidom::Element;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    time::Instant,
};

/// The result type for dump operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that may occur when reading a dump.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// An I/O error occurred during decompression.
    #[error("I/O error during decompression: {0}")]
    Decompression(io::Error),

    /// A DOM error occurred when processing the XML in the dump.
    #[error("DOM error: {0}")]
    Dom(#[from] minidom::Error),

    /// Data from the dump was not valid UTF-8.
    #[error("invalid utf-8: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    /// The dump was not valid UTF-8.
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// An I/O error ocurred reading the dump.
    #[error("{1}: I/O error: {0}")]
    Io(io::Error, PathBuf),

    /// An ID from the dump was not a valid number.
    #[error("id error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// A required element was missing from the XML in the dump.
    #[error("missing element on page: {0}")]
    MissingElement(String),
}

/// A parsed MediaWiki XML export.
pub(crate) struct Dump {
    /// The `<mediawiki>` root element.
    root: Element,
}

impl Dump {
    /// Reads an export file. Files with a `.bz2` extension are decompressed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let time = Instant::now();
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| Error::Io(err, path.into()))?;
        // SAFETY: This data is only ever used immutably.
        let data = unsafe { Mmap::map(&file).map_err(|err| Error::Io(err, path.into()))? };

        let dump = if path.extension().is_some_and(|ext| ext == "bz2") {
            log::info!("Decompressing {}", path.display());
            let mut decoded = Vec::new();
            io::copy(&mut DecoderReader::new(&data[..]), &mut decoded)
                .map_err(Error::Decompression)?;
            Self::from_xml(&String::from_utf8(decoded)?)?
        } else {
            Self::from_xml(std::str::from_utf8(&data)?)?
        };

        log::info!("Read {} in {:.2?}", path.display(), time.elapsed());
        Ok(dump)
    }

    /// Parses an export from a string.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(Self {
            root: xml.parse::<Element>()?,
        })
    }

    /// The content language of the wiki, or `None` if the export does not
    /// say.
    ///
    /// The language is taken from the `xml:lang` attribute of the root
    /// element, or else from the database name in the site information
    /// (`dewiki` is German).
    pub fn language(&self) -> Option<String> {
        if let Some(lang) = self.root.attr("xml:lang").filter(|lang| !lang.is_empty()) {
            return Some(lang.to_string());
        }

        let ns = self.root.ns();
        let dbname = self
            .root
            .get_child("siteinfo", ns.as_str())?
            .get_child("dbname", ns.as_str())?
            .text();
        dbname
            .strip_suffix("wiki")
            .filter(|lang| !lang.is_empty())
            .map(ToString::to_string)
    }

    /// Returns every revision of every page in the given namespace, in
    /// document order. Each revision becomes its own [`Page`].
    pub fn pages(&self, namespace: i32) -> Result<Vec<Page>> {
        let ns = self.root.ns();
        let mut pages = Vec::new();
        for page in self.root.children().filter(|el| el.name() == "page") {
            let page_ns = try_get_child(page, "ns", &ns)?.text().trim().parse::<i32>()?;
            if page_ns == namespace {
                read_page(page, &ns, &mut pages)?;
            }
        }
        Ok(pages)
    }
}

/// Extracts one [`Page`] per revision from a `<page>` element.
fn read_page(page: &Element, ns: &str, out: &mut Vec<Page>) -> Result<()> {
    let title = try_get_child(page, "title", ns)?.text();
    let id = try_get_child(page, "id", ns)?.text().trim().parse::<u64>()?;
    let redirect = page
        .get_child("redirect", ns)
        .and_then(|r| r.attr("title"))
        .unwrap_or_default()
        .to_string();

    for revision in page.children().filter(|el| el.name() == "revision") {
        let revision_id = try_get_child(revision, "id", ns)?.text().trim().parse::<u64>()?;
        let text = revision
            .get_child("text", ns)
            .map(Element::text)
            .unwrap_or_default();
        out.push(Page {
            title: title.clone(),
            id,
            redirect: redirect.clone(),
            revision: revision_id,
            text,
        });
    }
    Ok(())
}

/// Tries to get a child element by name and namespace and returns an [`Error`]
/// if it does not exist.
fn try_get_child<'a>(element: &'a Element, name: &str, ns: &str) -> Result<&'a Element> {
    let child = element.get_child(name, ns);
    child.ok_or_else(|| Error::MissingElement(name.into()))
}
