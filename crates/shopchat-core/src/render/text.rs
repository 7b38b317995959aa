use std::fmt::Write as _;

use shopchat_config::WidgetConfig;
use shopchat_model::{Product, Store};

use super::DirectionsLink;
use crate::carousel::ProductCarousel;
use crate::feed::{FeedEntry, Message, Sender};

/// Plain-text rendering for the console frontend.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    links: DirectionsLink,
}

impl TextRenderer {
    pub fn new(widget: &WidgetConfig) -> Self {
        Self { links: DirectionsLink::new(widget) }
    }

    pub fn entry(&self, entry: &FeedEntry) -> String {
        match entry {
            FeedEntry::Text(m) => text_bubble(m),
            FeedEntry::Carousel(c) => carousel(c),
            FeedEntry::Store(s) => self.store_card(s),
            FeedEntry::Details(p) => details_card(p),
        }
    }

    fn store_card(&self, s: &Store) -> String {
        let mut out = format!("  [store] {}\n", s.store_name);
        let _ = writeln!(out, "    {}", s.full_address());
        if !s.timings.is_empty() {
            let _ = writeln!(out, "    Timings: {}", s.timings);
        }
        let _ = write!(out, "    Get Directions: {}", self.links.url(&s.address));
        out
    }
}

fn text_bubble(m: &Message) -> String {
    let who = match m.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    let mut lines = m.content.lines();
    let mut out = format!("[{}] {who}: {}", m.timestamp, lines.next().unwrap_or_default());
    let indent = " ".repeat(m.timestamp.len() + who.len() + 5);
    for line in lines {
        let _ = write!(out, "\n{indent}{line}");
    }
    out
}

fn carousel(c: &ProductCarousel) -> String {
    let mut out = format!("  [products: {}]", c.products.len());
    for (i, p) in c.products.iter().enumerate() {
        let _ = write!(out, "\n  {:>2}. {}", i + 1, product_line(p));
        for f in &p.features {
            let _ = write!(out, "\n      - {f}");
        }
        if !p.product_url.is_empty() {
            let _ = write!(out, "\n      {}", p.product_url);
        }
    }
    out
}

fn details_card(p: &Product) -> String {
    let mut out = format!("  [product] {}", product_line(p));
    if !p.product_url.is_empty() {
        let _ = write!(out, "\n    {}", p.product_url);
    }
    for f in &p.features {
        let _ = write!(out, "\n    ✔ {f}");
    }
    out
}

fn product_line(p: &Product) -> String {
    if p.product_mrp.is_empty() {
        p.product_name.clone()
    } else {
        format!("{} ({})", p.product_name, p.product_mrp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TextRenderer {
        TextRenderer::new(&WidgetConfig::default())
    }

    #[test]
    fn text_bubble_shows_time_and_sender() {
        let m = Message { content: "hello".into(), sender: Sender::User, timestamp: "10:15".into() };
        assert_eq!(renderer().entry(&FeedEntry::Text(m)), "[10:15] you: hello");
    }

    #[test]
    fn multi_line_text_is_indented() {
        let m = Message { content: "a\nb".into(), sender: Sender::Bot, timestamp: "10:15".into() };
        assert_eq!(renderer().entry(&FeedEntry::Text(m)), "[10:15] bot: a\n             b");
    }

    #[test]
    fn carousel_numbers_products() {
        let c = ProductCarousel::new(vec![
            Product { product_name: "A".into(), product_mrp: "₹1".into(), ..Product::default() },
            Product { product_name: "B".into(), ..Product::default() },
        ]);
        assert_eq!(renderer().entry(&FeedEntry::Carousel(c)), "  [products: 2]\n   1. A (₹1)\n   2. B");
    }

    #[test]
    fn carousel_lists_features_under_each_product() {
        let c = ProductCarousel::new(vec![Product {
            product_name: "A".into(),
            features: vec!["5G".into(), "OLED".into()],
            product_url: "https://shop/a".into(),
            ..Product::default()
        }]);
        assert_eq!(
            renderer().entry(&FeedEntry::Carousel(c)),
            "  [products: 1]\n   1. A\n      - 5G\n      - OLED\n      https://shop/a"
        );
    }

    #[test]
    fn details_list_features_with_check_mark() {
        let p = Product {
            product_name: "TV".into(),
            features: vec!["4K".into(), "HDR".into()],
            ..Product::default()
        };
        let out = renderer().entry(&FeedEntry::Details(p));
        assert!(out.ends_with("\n    ✔ 4K\n    ✔ HDR"), "{out}");
    }

    #[test]
    fn store_includes_directions_link() {
        let s = Store { store_name: "S".into(), address: "1 Rd".into(), ..Store::default() };
        let out = renderer().entry(&FeedEntry::Store(s));
        assert!(out.contains("query=Lotus+Electronics+1+Rd"), "{out}");
        assert!(!out.contains("Timings:"));
    }
}
