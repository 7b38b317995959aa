use shopchat_config::WidgetConfig;
use tracing::warn;
use url::Url;

/// Used when the configured map search URL does not parse.
const DEFAULT_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";

/// Builds "Get Directions" links for store cards.
#[derive(Debug, Clone)]
pub struct DirectionsLink {
    business_name: String,
    /// `None` when the configured base was invalid.
    maps_base: Option<Url>,
}

impl DirectionsLink {
    pub fn new(widget: &WidgetConfig) -> Self {
        let maps_base = match Url::parse(&widget.maps_search_url) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(url = %widget.maps_search_url, error = %e, "invalid maps_search_url, using default");
                None
            }
        };
        Self { business_name: widget.business_name.clone(), maps_base }
    }

    /// Map search URL whose `query` is the business name and the address
    /// separated by a space, form-encoded.
    pub fn url(&self, address: &str) -> String {
        let query = format!("{} {}", self.business_name, address);
        match &self.maps_base {
            Some(base) => {
                let mut url = base.clone();
                url.query_pairs_mut().append_pair("query", &query);
                url.to_string()
            }
            None => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("query", &query)
                    .finish();
                format!("{DEFAULT_MAPS_SEARCH_URL}&{encoded}")
            }
        }
    }
}
