//! Tidy utils - deep clone/compare, date and URL helpers, timing gates, cookie codec

pub mod classify;
pub mod clone;
pub mod compare;
pub mod config;
pub mod cookie;
pub mod date;
pub mod error;
pub mod host;
pub mod timing_gate;
pub mod toolkit;
pub mod url_params;
pub mod value;

pub use classify::{classify, coarse_classify, CoarseType, TypeTag};
pub use clone::clone_deep;
pub use compare::compare;
pub use config::UtilsConfig;
pub use cookie::{
    decode_cookies, encode_cookies, join_cookie_directives, DecodeOptions, COOKIE_SEPARATOR,
};
pub use date::{
    arr_to_string, default_rules, parse_duration, DateUnit, DurationInfo, TransferRule,
    DATE_SEPARATOR,
};
pub use error::{FixSuggestion, UtilError};
pub use host::{CookieStore, HostContext, MemoryCookieStore};
pub use timing_gate::{GateCompletion, GateOptions, TimingGate};
pub use toolkit::{create_browser_utils, create_core_utils, BrowserUtils, CoreUtils};
pub use url_params::{filter_url_params, FilterMode, ParamFilter};
pub use value::{Array, Function, Map, Object, Set, Symbol, Value};
