//! Series query marshaling.
//!
//! The inbound query string is decoded as `application/x-www-form-urlencoded`
//! into key → values. Blank values are dropped while parsing and the first
//! remaining value of a key wins. The six upstream parameters are always
//! emitted, in a fixed order, even when empty.

use std::collections::HashMap;

use url::{form_urlencoded, Url};

/// Value of `function` when the client does not send one.
pub const DEFAULT_FUNCTION: &str = "GetSeries";

/// Decoded inbound query: every key with all of its non-blank values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Decode a raw query string (the part after `?`).
    pub fn parse(query: &str) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            values
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self { values }
    }

    /// All values recorded for `key`, in arrival order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// First value for `key`, or `default` when there is none.
    pub fn first_or(&self, key: &str, default: &str) -> String {
        self.get_all(key)
            .first()
            .map_or_else(|| default.to_string(), Clone::clone)
    }
}

/// The six parameters forwarded to the upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub user: String,
    pub pass: String,
    pub firstdate: String,
    pub lastdate: String,
    pub timeseries: String,
    pub function: String,
}

impl Default for SeriesQuery {
    fn default() -> Self {
        Self {
            user: String::new(),
            pass: String::new(),
            firstdate: String::new(),
            lastdate: String::new(),
            timeseries: String::new(),
            function: DEFAULT_FUNCTION.to_string(),
        }
    }
}

impl SeriesQuery {
    /// Build from a raw inbound query string. Values are not validated.
    pub fn from_query(query: &str) -> Self {
        let params = QueryParams::parse(query);
        Self {
            user: params.first_or("user", ""),
            pass: params.first_or("pass", ""),
            firstdate: params.first_or("firstdate", ""),
            lastdate: params.first_or("lastdate", ""),
            timeseries: params.first_or("timeseries", ""),
            function: params.first_or("function", DEFAULT_FUNCTION),
        }
    }

    /// Parameters in upstream order.
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("user", self.user.as_str()),
            ("pass", self.pass.as_str()),
            ("firstdate", self.firstdate.as_str()),
            ("lastdate", self.lastdate.as_str()),
            ("timeseries", self.timeseries.as_str()),
            ("function", self.function.as_str()),
        ]
    }

    /// Form-encode the parameters (spaces become `+`).
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    /// `base` with its query replaced by the encoded parameters.
    pub fn upstream_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&self.encode()));
        url
    }

    /// Copy safe to log: a non-empty password is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.pass.is_empty() {
            copy.pass = "***".to_string();
        }
        copy
    }
}
