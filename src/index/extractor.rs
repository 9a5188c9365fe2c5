//! Extraction of symbols from the symbol index markup
//!
//! The page is a long flat list of anchors separated by line breaks, where the
//! text after an anchor (up to the next break or anchor) qualifies it, e.g.
//! `<a href="...">std::swap</a> (std::vector)<br>`. The parsed document is
//! walked in order and reduced to a handful of [`MarkupEvent`]s, which
//! [`ExtractorState`] folds into [`RawTriple`]s.

use crate::index::constants::SYMBOL_INDEX_PATH;
use crate::index::normalize::normalize_href;
use crate::index::types::IndexOption;
use scraper::{ElementRef, Html, Node};

/// One extracted (symbol, label, url) record before merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTriple {
    pub symbol: String,
    /// Anchor text as written on the page
    pub label_base: String,
    pub url: String,
    /// Normalized free text that followed the anchor, possibly empty
    pub tail: String,
}

impl RawTriple {
    /// Full label: the anchor text followed by its tail, if any
    pub fn label(&self) -> String {
        if self.tail.is_empty() {
            self.label_base.clone()
        } else {
            format!("{} {}", self.label_base, self.tail)
        }
    }

    pub fn to_option(&self) -> IndexOption {
        IndexOption::new(self.label(), self.url.clone())
    }
}

/// The markup events the extractor cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// `<a ...>` with its decoded `href`, if it has one
    OpenAnchor(Option<String>),
    CloseAnchor,
    LineBreak,
    /// Decoded character data between tags
    Text(String),
}

/// Extract every symbol triple from the symbol index markup
pub fn extract(markup: &str) -> Vec<RawTriple> {
    let document = Html::parse_document(markup);
    let mut state = ExtractorState::default();
    walk(document.root_element(), &mut state);
    state.finish()
}

#[derive(Debug, Default)]
struct OpenAnchor {
    href: String,
    text_parts: Vec<String>,
}

#[derive(Debug)]
struct PendingTriple {
    symbol: String,
    label_base: String,
    url: String,
}

/// Scanner state between markup events
#[derive(Debug, Default)]
pub struct ExtractorState {
    open_anchor: Option<OpenAnchor>,
    pending: Option<PendingTriple>,
    tail_parts: Vec<String>,
    triples: Vec<RawTriple>,
}

impl ExtractorState {
    pub fn apply(&mut self, event: MarkupEvent) {
        match event {
            MarkupEvent::OpenAnchor(href) => self.on_open_anchor(href),
            MarkupEvent::CloseAnchor => self.on_close_anchor(),
            MarkupEvent::LineBreak => self.on_line_break(),
            MarkupEvent::Text(text) => self.on_text(&text),
        }
    }

    fn on_open_anchor(&mut self, href: Option<String>) {
        self.finalize_pending();
        self.open_anchor = href
            .filter(|href| !href.is_empty())
            .map(|href| OpenAnchor {
                href,
                text_parts: Vec::new(),
            });
    }

    fn on_line_break(&mut self) {
        self.finalize_pending();
    }

    fn on_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match self.open_anchor.as_mut() {
            Some(anchor) => anchor.text_parts.push(text.to_string()),
            None if self.pending.is_some() => self.tail_parts.push(text.to_string()),
            None => {}
        }
    }

    fn on_close_anchor(&mut self) {
        let Some(anchor) = self.open_anchor.take() else {
            return;
        };
        self.pending = None;
        self.tail_parts.clear();

        let raw_text = anchor.text_parts.concat();
        let raw_text = raw_text.trim();
        let symbol = clean_symbol(raw_text);
        if symbol.is_empty() {
            return;
        }
        let Some(url) = normalize_href(&anchor.href) else {
            tracing::trace!("Skipping anchor {symbol:?} with rejected href {:?}", anchor.href);
            return;
        };
        if url.starts_with(SYMBOL_INDEX_PATH) {
            return;
        }

        self.pending = Some(PendingTriple {
            label_base: raw_text.to_string(),
            symbol,
            url,
        });
    }

    fn finalize_pending(&mut self) {
        let tail_parts = std::mem::take(&mut self.tail_parts);
        if let Some(pending) = self.pending.take() {
            self.triples.push(RawTriple {
                symbol: pending.symbol,
                label_base: pending.label_base,
                url: pending.url,
                tail: normalize_tail(&tail_parts),
            });
        }
    }

    /// Flush anything still pending and return the extracted triples
    pub fn finish(mut self) -> Vec<RawTriple> {
        self.finalize_pending();
        self.triples
    }
}

/// Strip the decoration characters `(`, `)`, `<`, `>` and surrounding whitespace
pub fn clean_symbol(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '(' | ')' | '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Join tail fragments with single spaces and tighten spacing around parentheses
pub fn normalize_tail(parts: &[String]) -> String {
    let joined = parts.join(" ");
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace("( ", "(").replace(" )", ")")
}

/// Feed the children of `element` to `state` in document order
fn walk(element: ElementRef<'_>, state: &mut ExtractorState) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => state.apply(MarkupEvent::Text((**text).to_string())),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    visit(child, state);
                }
            }
            _ => {}
        }
    }
}

fn visit(element: ElementRef<'_>, state: &mut ExtractorState) {
    match element.value().name() {
        "a" => {
            let href = element.value().attr("href").map(str::to_string);
            state.apply(MarkupEvent::OpenAnchor(href));
            walk(element, state);
            state.apply(MarkupEvent::CloseAnchor);
        }
        "br" => state.apply(MarkupEvent::LineBreak),
        "script" | "style" | "template" => {}
        _ => walk(element, state),
    }
}
