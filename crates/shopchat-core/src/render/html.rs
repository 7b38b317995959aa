// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::fmt;

use shopchat_config::WidgetConfig;
use shopchat_model::{Product, Store};
use url::Url;

use crate::carousel::ProductCarousel;
use super::DirectionsLink;
use crate::feed::{FeedEntry, Message, MessageFeed, Sender};

/// Escape HTML special characters for safe embedding in HTML documents.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// An HTML fragment.  Text only gets in through [`Markup::escape`] unless a
/// caller explicitly opts into [`Markup::raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn escape(text: &str) -> Self {
        Markup(escape_html(text))
    }

    pub fn raw(html: impl Into<String>) -> Self {
        Markup(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn tag(&mut self, html: &'static str) -> &mut Self {
        self.0.push_str(html);
        self
    }

    fn text(&mut self, text: &str) -> &mut Self {
        self.0.push_str(&escape_html(text));
        self
    }

    fn push(&mut self, other: Markup) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders feed entries as HTML fragments.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    links: DirectionsLink,
    carousel_step: u32,
    trust_bot_markup: bool,
}

impl HtmlRenderer {
    pub fn new(widget: &WidgetConfig) -> Self {
        Self {
            links: DirectionsLink::new(widget),
            carousel_step: widget.carousel_step,
            trust_bot_markup: widget.trust_bot_markup,
        }
    }

    pub fn feed(&self, feed: &MessageFeed) -> Markup {
        let mut out = Markup::default();
        out.tag("<div class=\"chat-messages\">");
        for entry in feed.entries() {
            out.push(self.entry(entry));
        }
        out.tag("</div>");
        out
    }

    pub fn entry(&self, entry: &FeedEntry) -> Markup {
        match entry {
            FeedEntry::Text(m) => self.text_bubble(m),
            FeedEntry::Carousel(c) => self.carousel(c),
            FeedEntry::Store(s) => self.store_card(s),
            FeedEntry::Details(p) => self.details_card(p),
        }
    }

    pub fn text_bubble(&self, m: &Message) -> Markup {
        let mut out = Markup::default();
        out.tag(match m.sender {
            Sender::User => "<div class=\"message user-message\"><div class=\"message-content\">",
            Sender::Bot => "<div class=\"message bot-message\"><div class=\"message-content\">",
        });
        if m.sender == Sender::Bot && self.trust_bot_markup {
            out.push(Markup::raw(m.content.as_str()));
        } else {
            out.text(&m.content);
        }
        out.tag("</div><span class=\"message-time\">")
            .text(&m.timestamp)
            .tag("</span></div>");
        out
    }

    pub fn carousel(&self, c: &ProductCarousel) -> Markup {
        let mut out = Markup::raw(format!(
            "<div class=\"product-carousel\" data-offset=\"{}\" data-step=\"{}\">",
            c.offset(),
            self.carousel_step
        ));
        out.tag("<button class=\"carousel-prev\" aria-label=\"Previous\">&#8249;</button>")
            .tag("<div class=\"carousel-track\">");
        for p in &c.products {
            out.tag("<div class=\"product-card\">")
                .push(image(p))
                .tag("<h4 class=\"product-name\">")
                .text(&p.product_name)
                .tag("</h4><p class=\"product-price\">")
                .text(&p.product_mrp)
                .tag("</p>");
            if !p.features.is_empty() {
                out.tag("<div class=\"product-features\">");
                for f in &p.features {
                    out.tag("<span class=\"feature\">").text(f).tag("</span>");
                }
                out.tag("</div>");
            }
            out.push(link("view-product", &p.product_url, "View Product"))
                .tag("</div>");
        }
        out.tag("</div>")
            .tag("<button class=\"carousel-next\" aria-label=\"Next\">&#8250;</button></div>");
        out
    }

    pub fn details_card(&self, p: &Product) -> Markup {
        let mut out = Markup::default();
        out.tag("<div class=\"product-details\"><div class=\"details-top\">")
            .tag("<div class=\"details-image\">")
            .push(image(p))
            .tag("</div><div class=\"details-info\"><h3 class=\"product-name\">")
            .text(&p.product_name)
            .tag("</h3><p class=\"product-price\">")
            .text(&p.product_mrp)
            .tag("</p><div class=\"details-actions\">")
            .push(link("view-product", &p.product_url, "View Product"))
            .tag("<button class=\"add-to-cart-btn\">Add to Cart</button>")
            .tag("</div></div></div>");
        if !p.features.is_empty() {
            out.tag("<ul class=\"details-features\">");
            for f in &p.features {
                out.tag("<li>✔ ").text(f).tag("</li>");
            }
            out.tag("</ul>");
        }
        out.tag("</div>");
        out
    }

    pub fn store_card(&self, s: &Store) -> Markup {
        let mut out = Markup::default();
        out.tag("<div class=\"store-card\"><h4 class=\"store-name\">")
            .text(&s.store_name)
            .tag("</h4><p class=\"store-address\">")
            .text(&s.full_address())
            .tag("</p><p class=\"store-timings\"><strong>Timings:</strong> ")
            .text(&s.timings)
            .tag("</p>")
            .push(link("directions", &self.directions_url(&s.address), "Get Directions"))
            .tag("</div>");
        out
    }

    pub fn directions_url(&self, address: &str) -> String {
        self.links.url(address)
    }
}

fn image(p: &Product) -> Markup {
    let mut out = Markup::default();
    match safe_url(&p.product_image) {
        Some(src) => {
            out.tag("<img src=\"")
                .text(src)
                .tag("\" alt=\"")
                .text(&p.product_name)
                .tag("\">");
        }
        None => {
            out.tag("<div class=\"image-placeholder\"></div>");
        }
    }
    out
}

/// Anchor opening in a new tab.  Links with an unusable URL are rendered as
/// plain labels.
fn link(class: &'static str, href: &str, label: &'static str) -> Markup {
    let mut out = Markup::default();
    match safe_url(href) {
        Some(href) => {
            out.tag("<a class=\"")
                .tag(class)
                .tag("\" href=\"")
                .text(href)
                .tag("\" target=\"_blank\" rel=\"noopener noreferrer\">")
                .tag(label)
                .tag("</a>");
        }
        None => {
            out.tag("<span class=\"").tag(class).tag("\">").tag(label).tag("</span>");
        }
    }
    out
}

/// Only absolute `http`/`https` URLs are placed in attributes.
fn safe_url(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(raw)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
