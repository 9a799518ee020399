//! Cookie string codec
//!
//! `encode_cookies` packs `name -> "value; Attr=..."` pairs into one
//! delimited string; `decode_cookies` splits such a string and writes each
//! directive to a host `CookieStore`.
//!
//! ```text
//! tid=761cc; Domain=.example.com; Path=/||uid=997593; Path=/
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::UtilError;
use crate::host::{CookieStore, HostContext};

/// Default separator between two cookie directives
pub const COOKIE_SEPARATOR: &str = "||";

/// Join `key=value` pairs with `separator`
pub fn encode_cookies<I, K, V>(pairs: I, separator: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Join already-built `key=value; ...` directives with `separator`, unchanged
pub fn join_cookie_directives<I, S>(directives: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    directives
        .into_iter()
        .map(|d| d.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// How `decode_cookies` turns directives into writes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub separator: String,
    /// Attributes appended to every directive when `use_all` is off
    pub params: IndexMap<String, String>,
    /// Attributes whose value in the directive overrides `params`
    pub allow_old_keys: Vec<String>,
    /// Write every directive verbatim
    pub use_all: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            separator: COOKIE_SEPARATOR.to_string(),
            params: IndexMap::from([("Path".to_string(), "/".to_string())]),
            allow_old_keys: Vec::new(),
            use_all: true,
        }
    }
}

impl DecodeOptions {
    /// Defaults with `Domain` set to the host name
    pub fn for_host(host: &HostContext) -> Self {
        Self::default().with_host_domain(host)
    }

    /// Put `Domain=<hostname>` first unless a domain is already configured
    pub fn with_host_domain(mut self, host: &HostContext) -> Self {
        if !self.params.contains_key("Domain") {
            self.params
                .shift_insert(0, "Domain".to_string(), host.hostname.clone());
        }
        self
    }

    /// Rebuild one directive: its leading `name=value`, then `params`
    ///
    /// Keys listed in `allow_old_keys` keep the directive's own non-empty
    /// value. Defaults are copied per directive, so one directive's
    /// attributes never leak into the next.
    pub fn merge(&self, directive: &str) -> String {
        let mut parts = directive.split("; ");
        let mut cookie = parts.next().unwrap_or_default().to_string();

        let mut params = self.params.clone();
        for attr in parts {
            let attr = attr.trim();
            let (key, value) = attr.split_once('=').unwrap_or((attr, ""));
            if !value.is_empty() && self.allow_old_keys.iter().any(|k| k == key) {
                params.insert(key.to_string(), value.to_string());
            }
        }

        for (key, value) in &params {
            cookie.push_str(&format!("; {}={}", key, value));
        }
        cookie
    }
}

/// Split `input` into directives and write each one to `store`
///
/// Returns how many directives were written. Empty input writes nothing.
/// Stops at the first directive the store rejects.
#[instrument(skip_all, fields(use_all = options.use_all))]
pub fn decode_cookies(
    input: &str,
    options: &DecodeOptions,
    store: &dyn CookieStore,
) -> Result<usize, UtilError> {
    if input.is_empty() {
        return Ok(0);
    }

    let directives: Vec<&str> = if options.separator.is_empty() {
        vec![input]
    } else {
        input.split(options.separator.as_str()).collect()
    };

    for directive in &directives {
        let cookie = if options.use_all {
            directive.to_string()
        } else {
            options.merge(directive)
        };
        debug!(cookie = %cookie, "writing cookie");
        store.write(&cookie)?;
    }

    Ok(directives.len())
}
