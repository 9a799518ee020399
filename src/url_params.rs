//! URL query parameter filtering
//!
//! Works on the literal text: nothing is decoded or re-encoded, and only
//! the part after the first `?` is touched.

use serde::Deserialize;

/// Which keys to drop or keep
///
/// `remove` wins whenever it is non-empty; otherwise `reserve` is used.
/// With both empty every parameter is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParamFilter {
    #[serde(default)]
    pub remove: Vec<String>,
    #[serde(default)]
    pub reserve: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Keep every key not listed in `remove`
    Remove,
    /// Keep only keys listed in `reserve`
    Reserve,
}

impl ParamFilter {
    pub fn removing<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remove: keys.into_iter().map(Into::into).collect(),
            reserve: Vec::new(),
        }
    }

    pub fn reserving<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remove: Vec::new(),
            reserve: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mode(&self) -> FilterMode {
        if self.remove.is_empty() {
            FilterMode::Reserve
        } else {
            FilterMode::Remove
        }
    }

    fn keeps(&self, mode: FilterMode, key: &str) -> bool {
        match mode {
            FilterMode::Remove => !self.remove.iter().any(|k| k == key),
            FilterMode::Reserve => self.reserve.iter().any(|k| k == key),
        }
    }
}

/// Drop or keep query parameters by key
///
/// A segment's key is the text before its first `=`; an empty segment has
/// the empty key. Surviving segments are re-joined with `&` exactly as
/// written. An empty query, or one with no survivors, drops the `?`.
pub fn filter_url_params(url: &str, filter: &ParamFilter) -> String {
    let (base, query) = match url.split_once('?') {
        Some(parts) => parts,
        None => return url.to_string(),
    };
    if query.is_empty() {
        return base.to_string();
    }

    let mode = filter.mode();
    let kept: Vec<&str> = query
        .split('&')
        .filter(|segment| {
            let key = segment.split_once('=').map_or(*segment, |(k, _)| k);
            filter.keeps(mode, key)
        })
        .collect();

    if kept.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, kept.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_mode() {
        let out = filter_url_params("http://x.com?a=1&b=2&c=3", &ParamFilter::removing(["b"]));
        assert_eq!(out, "http://x.com?a=1&c=3");
    }

    #[test]
    fn reserve_mode() {
        let out = filter_url_params("http://x.com?a=1&b=2", &ParamFilter::reserving(["a"]));
        assert_eq!(out, "http://x.com?a=1");
    }

    #[test]
    fn remove_wins_when_both_set() {
        let filter = ParamFilter {
            remove: vec!["a".into()],
            reserve: vec!["a".into()],
        };
        assert_eq!(filter.mode(), FilterMode::Remove);
        assert_eq!(filter_url_params("/p?a=1&b=2", &filter), "/p?b=2");
    }

    #[test]
    fn both_empty_strips_query() {
        let out = filter_url_params("/p?a=1&b=2", &ParamFilter::default());
        assert_eq!(out, "/p");
    }

    #[test]
    fn no_query_is_untouched() {
        assert_eq!(filter_url_params("/plain", &ParamFilter::removing(["a"])), "/plain");
    }

    #[test]
    fn all_removed_drops_question_mark() {
        assert_eq!(filter_url_params("/p?a=1", &ParamFilter::removing(["a"])), "/p");
        assert_eq!(filter_url_params("/p?", &ParamFilter::removing(["a"])), "/p");
    }

    #[test]
    fn keys_without_values_and_encoded_text() {
        let out = filter_url_params("/p?flag&q=a%20b&x=1=2", &ParamFilter::removing(["x"]));
        assert_eq!(out, "/p?flag&q=a%20b");
    }

    #[test]
    fn empty_segments_are_kept_verbatim() {
        let keep_all = ParamFilter::removing(["z"]);
        assert_eq!(filter_url_params("/p?a=1&&b=2", &keep_all), "/p?a=1&&b=2");
        assert_eq!(filter_url_params("/p?a=1&", &keep_all), "/p?a=1&");
        assert_eq!(filter_url_params("/p?&a=1", &keep_all), "/p?&a=1");

        // The empty key is never on a reserve list unless asked for
        let out = filter_url_params("/p?a=1&&b=2", &ParamFilter::reserving(["a", "b"]));
        assert_eq!(out, "/p?a=1&b=2");
    }

    #[test]
    fn only_first_question_mark_splits() {
        let out = filter_url_params("/p?a=1?x&b=2", &ParamFilter::reserving(["a"]));
        assert_eq!(out, "/p?a=1?x");
    }

    #[test]
    fn filter_from_yaml() {
        let filter: ParamFilter = serde_yaml::from_str("reserve: [id, page]").unwrap();
        assert_eq!(filter.mode(), FilterMode::Reserve);
        assert_eq!(filter_url_params("/list?id=4&page=2&sort=asc", &filter), "/list?id=4&page=2");
    }
}
