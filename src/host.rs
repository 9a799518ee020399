//! Host context for cookie-backed helpers
//!
//! Nothing here probes for a browser. Callers that have a cookie store
//! build a `HostContext` and hand it to `create_browser_utils`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::UtilError;

/// Persistent cookie storage owned by the host
pub trait CookieStore: Send + Sync {
    /// All `(name, value)` pairs, in first-write order
    fn entries(&self) -> Vec<(String, String)>;

    /// Apply one `name=value; Attr=...` directive
    fn write(&self, directive: &str) -> Result<(), UtilError>;
}

/// What a browser-like host provides
#[derive(Clone)]
pub struct HostContext {
    /// Default `Domain` for written cookies
    pub hostname: String,
    pub cookies: Arc<dyn CookieStore>,
}

impl HostContext {
    pub fn new(hostname: impl Into<String>, cookies: Arc<dyn CookieStore>) -> Self {
        Self {
            hostname: hostname.into(),
            cookies,
        }
    }

    /// Host backed by a fresh `MemoryCookieStore`; the store handle is returned for inspection
    pub fn in_memory(hostname: impl Into<String>) -> (Self, Arc<MemoryCookieStore>) {
        let store = Arc::new(MemoryCookieStore::new());
        let host = Self::new(hostname, Arc::clone(&store) as Arc<dyn CookieStore>);
        (host, store)
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("hostname", &self.hostname)
            .field("cookies", &self.cookies.entries().len())
            .finish()
    }
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    attributes: Vec<(String, String)>,
    seq: u64,
}

/// In-memory cookie jar with document-cookie write semantics (lock-free)
///
/// Writing an existing name replaces its value and attributes but keeps
/// its original position.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: DashMap<String, StoredCookie>,
    next_seq: AtomicU64,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|c| c.value.clone())
    }

    /// Attributes recorded with the last write of `name`
    pub fn attributes(&self, name: &str) -> Vec<(String, String)> {
        self.cookies
            .get(name)
            .map(|c| c.attributes.clone())
            .unwrap_or_default()
    }

    /// `a=1; b=2`, as a document would report it
    pub fn cookie_header(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn entries(&self) -> Vec<(String, String)> {
        let mut stored: Vec<(u64, String, String)> = self
            .cookies
            .iter()
            .map(|c| (c.seq, c.key().clone(), c.value.clone()))
            .collect();
        stored.sort_by_key(|(seq, _, _)| *seq);
        stored.into_iter().map(|(_, name, value)| (name, value)).collect()
    }

    fn write(&self, directive: &str) -> Result<(), UtilError> {
        let mut parts = directive.split(';');
        let pair = parts.next().unwrap_or_default().trim();

        let (name, value) = pair.split_once('=').ok_or_else(|| UtilError::CookieWrite {
            directive: directive.to_string(),
            reason: "missing name=value pair".into(),
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(UtilError::CookieWrite {
                directive: directive.to_string(),
                reason: "empty cookie name".into(),
            });
        }

        let attributes = parts
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .map(|attr| match attr.split_once('=') {
                Some((k, v)) => (k.trim().to_string(), v.trim().to_string()),
                None => (attr.to_string(), String::new()),
            })
            .collect();

        match self.cookies.entry(name.to_string()) {
            Entry::Occupied(mut e) => {
                let cookie = e.get_mut();
                cookie.value = value.trim().to_string();
                cookie.attributes = attributes;
            }
            Entry::Vacant(e) => {
                e.insert(StoredCookie {
                    value: value.trim().to_string(),
                    attributes,
                    seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read_back() {
        let store = MemoryCookieStore::new();
        store.write("tid=abc; Domain=.example.com; Path=/").unwrap();
        store.write("uid=42").unwrap();

        assert_eq!(store.get("tid").as_deref(), Some("abc"));
        assert_eq!(
            store.attributes("tid"),
            vec![
                ("Domain".to_string(), ".example.com".to_string()),
                ("Path".to_string(), "/".to_string()),
            ]
        );
        assert_eq!(store.cookie_header(), "tid=abc; uid=42");
    }

    #[test]
    fn overwrite_keeps_position() {
        let store = MemoryCookieStore::new();
        store.write("a=1").unwrap();
        store.write("b=2").unwrap();
        store.write("a=3; Secure").unwrap();

        assert_eq!(
            store.entries(),
            vec![("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
        assert_eq!(store.attributes("a"), vec![("Secure".to_string(), String::new())]);
    }

    #[test]
    fn rejects_directive_without_pair() {
        let store = MemoryCookieStore::new();
        assert!(matches!(store.write("novalue"), Err(UtilError::CookieWrite { .. })));
        assert!(matches!(store.write("=x"), Err(UtilError::CookieWrite { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn in_memory_host_shares_store() {
        let (host, store) = HostContext::in_memory("example.com");
        host.cookies.write("k=v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(host.hostname, "example.com");
    }
}
