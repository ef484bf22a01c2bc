//! Header injection options.

use http::header::{self, HeaderMap, HeaderValue};

/// `Accept` sent by default.
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";

/// `Accept-Language` sent by default.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// `User-Agent` sent by default (Edge 127 on Windows).
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36 Edg/127.0.0.0";

/// Which headers to inject into outgoing requests.
///
/// Header names are matched case-insensitively; a header already present on
/// the request is never replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// When false, no header is ever added.
    pub add_missing_headers: bool,
    /// Headers considered for injection.
    pub headers: HeaderMap,
}

impl Default for Options {
    fn default() -> Self {
        Self::default_options()
    }
}

impl Options {
    /// The browser-like defaults: `Accept`, `Accept-Language` and `User-Agent`.
    ///
    /// Every call builds a new, independent header map.
    pub fn default_options() -> Self {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(header::ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );

        Self {
            add_missing_headers: true,
            headers,
        }
    }

    /// Options that inject nothing.
    pub fn disabled() -> Self {
        Self {
            add_missing_headers: false,
            headers: HeaderMap::new(),
        }
    }

    /// Start from an empty header set with injection enabled.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Fill in every configured header that `target` lacks.
    ///
    /// Returns how many header names were added.
    pub fn merge_into(&self, target: &mut HeaderMap) -> usize {
        if !self.add_missing_headers {
            return 0;
        }

        let mut added = 0;
        for name in self.headers.keys() {
            if target.contains_key(name) {
                continue;
            }
            for value in self.headers.get_all(name) {
                target.append(name.clone(), value.clone());
            }
            added += 1;
        }
        added
    }
}

/// Builder for [`Options`].
#[must_use]
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    options: Options,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self {
            options: Options {
                add_missing_headers: true,
                headers: HeaderMap::new(),
            },
        }
    }
}

impl OptionsBuilder {
    /// Start from the default browser headers instead of an empty set.
    pub fn from_defaults() -> Self {
        Self {
            options: Options::default_options(),
        }
    }

    /// Enable or disable header injection.
    pub fn add_missing_headers(mut self, enabled: bool) -> Self {
        self.options.add_missing_headers = enabled;
        self
    }

    /// Set a header, replacing any value configured earlier for that name.
    /// Invalid values are ignored.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: header::IntoHeaderName,
        V: TryInto<HeaderValue>,
    {
        if let Ok(val) = value.try_into() {
            self.options.headers.insert(key, val);
        }
        self
    }

    /// Replace the whole header set.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.options.headers = headers;
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}
