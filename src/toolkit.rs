//! Entry points
//!
//! - `create_core_utils()`: value, date, URL and timing helpers
//! - `create_browser_utils(host)`: the same, plus cookie helpers bound to
//!   a host context
//!
//! Callers pick the factory; nothing is detected from the environment.

use std::fmt::Display;
use std::ops::Deref;

use crate::classify::{classify, coarse_classify, CoarseType, TypeTag};
use crate::clone::clone_deep;
use crate::compare::compare;
use crate::config::UtilsConfig;
use crate::cookie::{decode_cookies, encode_cookies, join_cookie_directives, DecodeOptions};
use crate::date::{arr_to_string, parse_duration, DurationInfo, TransferRule};
use crate::error::UtilError;
use crate::host::HostContext;
use crate::timing_gate::{GateOptions, TimingGate};
use crate::url_params::{filter_url_params, ParamFilter};
use crate::value::Value;

/// Environment-free helpers with config-driven defaults
#[derive(Debug, Clone, Default)]
pub struct CoreUtils {
    config: UtilsConfig,
}

pub fn create_core_utils() -> CoreUtils {
    CoreUtils::default()
}

impl CoreUtils {
    pub fn with_config(config: UtilsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UtilsConfig {
        &self.config
    }

    pub fn clone_deep(&self, value: &Value) -> Value {
        clone_deep(value)
    }

    pub fn compare(&self, a: &Value, b: &Value) -> bool {
        compare(a, b)
    }

    pub fn classify(&self, value: &Value) -> TypeTag {
        classify(value)
    }

    pub fn coarse_classify(&self, value: &Value) -> CoarseType {
        coarse_classify(value)
    }

    /// Joins with the configured date separator
    pub fn arr_to_string<T: Display>(&self, components: &[T]) -> String {
        arr_to_string(components, &self.config.date_separator)
    }

    pub fn parse_duration(&self, input: &str, rules: &[TransferRule]) -> DurationInfo {
        parse_duration(input, rules)
    }

    /// Parses with the configured rules
    pub fn parse_duration_default(&self, input: &str) -> DurationInfo {
        parse_duration(input, &self.config.duration_rules)
    }

    pub fn filter_url_params(&self, url: &str, filter: &ParamFilter) -> String {
        filter_url_params(url, filter)
    }

    /// Filters with the configured `url_filter`
    pub fn filter_url(&self, url: &str) -> String {
        filter_url_params(url, &self.config.url_filter)
    }

    /// New gate with the configured minimum interval
    pub fn gate(&self) -> TimingGate {
        TimingGate::new(self.config.gate)
    }

    pub fn gate_with(&self, options: GateOptions) -> TimingGate {
        TimingGate::new(options)
    }
}

/// Core helpers plus cookie helpers for one host
///
/// Derefs to `CoreUtils`, so every core method is available directly.
#[derive(Debug, Clone)]
pub struct BrowserUtils {
    core: CoreUtils,
    host: HostContext,
}

pub fn create_browser_utils(host: HostContext) -> BrowserUtils {
    BrowserUtils::with_config(host, UtilsConfig::default())
}

impl BrowserUtils {
    pub fn with_config(host: HostContext, config: UtilsConfig) -> Self {
        Self {
            core: CoreUtils::with_config(config),
            host,
        }
    }

    pub fn core(&self) -> &CoreUtils {
        &self.core
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    /// Configured cookie options with `Domain` defaulting to the host name
    pub fn cookie_options(&self) -> DecodeOptions {
        self.core.config.cookie.clone().with_host_domain(&self.host)
    }

    /// Encode with the configured cookie separator
    pub fn encode_cookies<I, K, V>(&self, pairs: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        encode_cookies(pairs, &self.core.config.cookie.separator)
    }

    /// Join prebuilt directives with the configured cookie separator
    pub fn join_cookies<I, S>(&self, directives: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        join_cookie_directives(directives, &self.core.config.cookie.separator)
    }

    /// Decode into the host store using `cookie_options()`
    pub fn write_cookies(&self, input: &str) -> Result<usize, UtilError> {
        self.write_cookies_with(input, &self.cookie_options())
    }

    pub fn write_cookies_with(&self, input: &str, options: &DecodeOptions) -> Result<usize, UtilError> {
        decode_cookies(input, options, self.host.cookies.as_ref())
    }

    pub fn cookie_entries(&self) -> Vec<(String, String)> {
        self.host.cookies.entries()
    }
}

impl Deref for BrowserUtils {
    type Target = CoreUtils;

    fn deref(&self) -> &CoreUtils {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_uses_config_defaults() {
        let config = UtilsConfig {
            date_separator: "/".into(),
            url_filter: ParamFilter::removing(["token"]),
            ..UtilsConfig::default()
        };
        let utils = CoreUtils::with_config(config);

        assert_eq!(utils.arr_to_string(&[2024, 3, 1]), "2024/03/01");
        assert_eq!(utils.filter_url("/a?token=x&id=1"), "/a?id=1");
        assert_eq!(utils.parse_duration_default("2天").total_ms, 2 * 86_400_000);
    }

    #[test]
    fn browser_utils_expose_core() {
        let (host, _store) = HostContext::in_memory("example.com");
        let utils = create_browser_utils(host);

        assert_eq!(utils.classify(&Value::Null), TypeTag::Null);
        assert_eq!(utils.core().arr_to_string(&[1, 2]), "1-02");
    }

    #[test]
    fn cookie_options_default_domain_to_host() {
        let (host, _store) = HostContext::in_memory("shop.example.com");
        let utils = create_browser_utils(host);

        let options = utils.cookie_options();
        assert_eq!(options.params.get_index(0), Some((&"Domain".to_string(), &"shop.example.com".to_string())));
        assert_eq!(options.params.get("Path").map(String::as_str), Some("/"));
    }

    #[test]
    fn encode_then_write() {
        let (host, store) = HostContext::in_memory("example.com");
        let utils = create_browser_utils(host);

        let encoded = utils.encode_cookies([("a", "1; Path=/"), ("b", "2")]);
        assert_eq!(encoded, "a=1; Path=/||b=2");

        assert_eq!(utils.write_cookies(&encoded).unwrap(), 2);
        assert_eq!(store.cookie_header(), "a=1; b=2");
        assert_eq!(utils.cookie_entries().len(), 2);
    }

    #[test]
    fn prebuilt_directives_write_like_pairs() {
        let (host, store) = HostContext::in_memory("example.com");
        let utils = create_browser_utils(host);

        let joined = utils.join_cookies(["a=1; Path=/", "b=2"]);
        assert_eq!(joined, utils.encode_cookies([("a", "1; Path=/"), ("b", "2")]));

        assert_eq!(utils.write_cookies(&joined).unwrap(), 2);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }
}
