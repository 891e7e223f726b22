//! Request-target selection.
//!
//! Which endpoint serves a query is caller policy, not fetcher logic: the
//! storefront behaviour this generalizes routes one locale family to a
//! different search path than all others. The fetcher only sees the
//! resolved [`Url`].

use std::collections::HashMap;

use url::Url;

/// Lowercased language tag, e.g. `en`, `ar-sa`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        Locale(tag.trim().to_lowercase())
    }

    /// Primary language subtag: `ar-SA` and `ar_EG` both yield `ar`.
    pub fn primary(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Maps a (locale, raw query) pair to a fully-formed request target.
///
/// Stateless caller-owned configuration; implementations must be pure so
/// resolving the same pair twice yields the same target.
pub trait EndpointSelector: Send + Sync {
    fn resolve(&self, locale: &Locale, query: &str) -> Url;
}

impl<F> EndpointSelector for F
where
    F: Fn(&Locale, &str) -> Url + Send + Sync,
{
    fn resolve(&self, locale: &Locale, query: &str) -> Url {
        self(locale, query)
    }
}

/// Storefront-shaped selector: a base suggest URL, optional per-language
/// override URLs, and a fixed set of extra query parameters appended to
/// every target alongside the `q` parameter.
#[derive(Debug, Clone)]
pub struct SectionEndpoint {
    base: Url,
    overrides: HashMap<String, Url>,
    query_param: String,
    extra_params: Vec<(String, String)>,
}

impl SectionEndpoint {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
            query_param: "q".to_string(),
            extra_params: Vec::new(),
        }
    }

    /// Append a fixed parameter to every resolved target, e.g.
    /// `section_id=predictive-search`.
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.extra_params.push((name.to_string(), value.to_string()));
        self
    }

    /// Route a primary language subtag to a different base URL.
    pub fn with_override(mut self, language: &str, url: Url) -> Self {
        self.overrides.insert(language.to_lowercase(), url);
        self
    }

    /// Rename the query parameter (default `q`).
    pub fn with_query_param(mut self, name: &str) -> Self {
        self.query_param = name.to_string();
        self
    }
}

impl EndpointSelector for SectionEndpoint {
    fn resolve(&self, locale: &Locale, query: &str) -> Url {
        let mut target = self
            .overrides
            .get(locale.primary())
            .unwrap_or(&self.base)
            .clone();
        {
            let mut pairs = target.query_pairs_mut();
            pairs.append_pair(&self.query_param, query);
            for (name, value) in &self.extra_params {
                pairs.append_pair(name, value);
            }
        }
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> SectionEndpoint {
        SectionEndpoint::new(Url::parse("https://shop.example/search/suggest").unwrap())
            .with_param("section_id", "predictive-search")
            .with_override("ar", Url::parse("https://shop.example/ar/search").unwrap())
    }

    #[test]
    fn test_locale_primary_subtag() {
        assert_eq!(Locale::new("ar-SA").primary(), "ar");
        assert_eq!(Locale::new("ar_EG").primary(), "ar");
        assert_eq!(Locale::new("EN").primary(), "en");
        assert_eq!(Locale::new("").primary(), "");
    }

    #[test]
    fn test_default_route_carries_query_and_params() {
        let target = endpoint().resolve(&Locale::new("en"), "red shoes");
        assert_eq!(target.host_str(), Some("shop.example"));
        assert_eq!(target.path(), "/search/suggest");
        assert_eq!(
            target.query(),
            Some("q=red+shoes&section_id=predictive-search")
        );
    }

    #[test]
    fn test_locale_family_routes_to_override() {
        let target = endpoint().resolve(&Locale::new("ar-SA"), "sofa");
        assert_eq!(target.path(), "/ar/search");
        assert_eq!(target.query(), Some("q=sofa&section_id=predictive-search"));
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let target = endpoint().resolve(&Locale::new("en"), "50% off & more");
        let query = target.query().unwrap_or_default();
        assert!(query.contains("q=50%25+off+%26+more"), "got {query}");
    }

    #[test]
    fn test_closure_selector() {
        let selector = |_: &Locale, query: &str| {
            let mut url = Url::parse("https://shop.example/fixed").unwrap();
            url.query_pairs_mut().append_pair("term", query);
            url
        };
        let target = selector.resolve(&Locale::new("en"), "lamp");
        assert_eq!(target.query(), Some("term=lamp"));
    }
}
