//! HTML receipt tree, a read-only view over a `scraper` document.

use std::borrow::Cow;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

lazy_static! {
    static ref ROW: Selector = Selector::parse("tr").unwrap();
    static ref DATA_CELL: Selector = Selector::parse("td").unwrap();
    static ref HEADER_CELL: Selector = Selector::parse("th").unwrap();
    static ref TEXT_CONTAINER: Selector = Selector::parse("div, span, p").unwrap();
}

/// Cell kind within a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `<td>`
    Data,
    /// `<th>`
    Header,
}

/// Parsed HTML receipt page.
pub struct HtmlDocument {
    html: Html,
    lossy: bool,
}

impl HtmlDocument {
    /// Build the tree from raw page bytes. Invalid UTF-8 sequences are
    /// replaced with U+FFFD.
    pub fn parse(content: &[u8]) -> Self {
        match String::from_utf8_lossy(content) {
            Cow::Borrowed(text) => Self::parse_str(text),
            Cow::Owned(text) => {
                debug!("Page is not valid UTF-8, decoded lossily");
                Self {
                    lossy: true,
                    ..Self::parse_str(&text)
                }
            }
        }
    }

    /// Build the tree from page text. Never fails: markup errors are recovered by the parser.
    pub fn parse_str(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
            lossy: false,
        }
    }

    /// True when undecodable bytes were replaced while building the tree.
    pub fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// All table rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.select(&ROW)
    }

    /// `div`, `span` and `p` elements in document order.
    pub fn text_containers(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.select(&TEXT_CONTAINER)
    }

    /// All text of the document.
    pub fn text(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// Cells of the given kind inside a row.
pub fn cells<'a>(row: ElementRef<'a>, kind: CellKind) -> Vec<ElementRef<'a>> {
    let selector: &Selector = match kind {
        CellKind::Data => &*DATA_CELL,
        CellKind::Header => &*HEADER_CELL,
    };
    row.select(selector).collect()
}

/// The element immediately following `row` among its siblings.
pub fn next_element(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.next_siblings().find_map(ElementRef::wrap)
}

/// Concatenated text of an element and its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text of an element.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element_text(element).trim().to_string()
}
