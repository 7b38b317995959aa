//! Renderers that turn feed entries into output for the non-interactive
//! frontends.  The terminal UI draws entries itself.

mod html;
mod links;
mod text;

pub use html::{escape_html, HtmlRenderer, Markup};
pub use links::DirectionsLink;
pub use text::TextRenderer;
