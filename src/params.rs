//! Parameter codec: typed parameter values, the parameter bag, query-string
//! parsing and the per-route validation/binding contract.
//!
//! Parameter values are a closed tagged type. Validation is a tag
//! comparison ([`ParamValue::value_type`] against [`ParamSpec::expected`]),
//! never runtime reflection. Everything parsed from a URL is a string;
//! coercing `"42"` into a number is a route's business, not the codec's.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::errors::NavError;

/// Maximum inline parameters before the bag spills to the heap.
/// Deep links carry a handful of query parameters at most.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Opaque in-process callback value. Only ever inserted by native callers,
/// never parsed from a URL.
pub type Callback = Rc<dyn Fn()>;

/// Type tag of a [`ParamValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Str,
    Int,
    Float,
    Bool,
    Callable,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Str => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Callable => "callable",
        })
    }
}

/// A typed parameter value.
#[derive(Clone)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// In-process callback, e.g. a completion block a screen invokes.
    Callable(Callback),
}

impl ParamValue {
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            ParamValue::Str(_) => ValueType::Str,
            ParamValue::Int(_) => ValueType::Int,
            ParamValue::Float(_) => ValueType::Float,
            ParamValue::Bool(_) => ValueType::Bool,
            ParamValue::Callable(_) => ValueType::Callable,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(v) => f.debug_tuple("Str").field(v).finish(),
            ParamValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            ParamValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            ParamValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            ParamValue::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::Str(a), ParamValue::Str(b)) => a == b,
            (ParamValue::Int(a), ParamValue::Int(b)) => a == b,
            (ParamValue::Float(a), ParamValue::Float(b)) => a == b,
            (ParamValue::Bool(a), ParamValue::Bool(b)) => a == b,
            // Callables compare by identity; there is nothing else to
            // compare them by.
            (ParamValue::Callable(a), ParamValue::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<Callback> for ParamValue {
    fn from(v: Callback) -> Self {
        ParamValue::Callable(v)
    }
}

/// Extraction of a typed value out of the bag; backs [`ParamMap::get`].
pub trait FromParam: Sized {
    fn from_param(value: &ParamValue) -> Option<Self>;
}

impl FromParam for String {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromParam for i64 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParam for f64 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParam for bool {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParam for Callback {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Callable(v) => Some(Rc::clone(v)),
            _ => None,
        }
    }
}

type Entries = SmallVec<[(String, ParamValue); MAX_INLINE_PARAMS]>;

/// Unique-keyed parameter bag.
///
/// Inserting an existing key replaces its value; later merges overwrite
/// earlier ones. Backed by a small inline vector: bags are tiny and a
/// linear scan beats hashing at this size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Entries,
}

impl ParamMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Fluent insert, for call sites building literal bags.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// The raw tagged value for `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Typed accessor: `params.get::<String>("mallId")`.
    ///
    /// Returns `None` both when the key is absent and when the value's tag
    /// does not match `T`.
    #[must_use]
    pub fn get<T: FromParam>(&self, key: &str) -> Option<T> {
        self.value(key).and_then(T::from_param)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// New bag with every key of `self`, keys present in `overrides`
    /// replaced by the override's value, and override-only keys appended.
    ///
    /// This is the precedence rule of the whole engine: explicit
    /// caller-supplied parameters beat parameters parsed from the URL's own
    /// query string.
    #[must_use]
    pub fn merge(&self, overrides: &ParamMap) -> ParamMap {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }
}

/// Per-route declaration of one expected parameter: name, type tag, and an
/// optional default inserted when the key is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    key: String,
    expected: ValueType,
    default: Option<ParamValue>,
}

impl ParamSpec {
    /// A parameter that must be present (validation fails with
    /// `MissingRequired` when it is not).
    #[must_use]
    pub fn required(key: impl Into<String>, expected: ValueType) -> Self {
        ParamSpec {
            key: key.into(),
            expected,
            default: None,
        }
    }

    /// A parameter bound to `default` when absent.
    #[must_use]
    pub fn with_default(
        key: impl Into<String>,
        expected: ValueType,
        default: impl Into<ParamValue>,
    ) -> Self {
        ParamSpec {
            key: key.into(),
            expected,
            default: Some(default.into()),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn expected(&self) -> ValueType {
        self.expected
    }

    #[must_use]
    pub fn default(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }
}

/// The base path before any `?` query or `#` fragment. Registry lookup is
/// keyed on this.
#[must_use]
pub fn strip_query(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Parse the query string of `url` into a bag of string values.
///
/// Values are percent-decoded exactly once; a value that fails to decode as
/// UTF-8 is kept verbatim. Pairs without `=` or with an empty key are
/// skipped. Duplicate keys keep the last occurrence.
#[must_use]
pub fn parse_query(url: &str) -> ParamMap {
    let mut params = ParamMap::new();
    let without_fragment = match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    };
    let Some((_, query)) = without_fragment.split_once('?') else {
        return params;
    };
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let decoded = urlencoding::decode(value)
            .map(Cow::into_owned)
            .unwrap_or_else(|_| value.to_string());
        params.insert(key, decoded);
    }
    params
}

/// Insert the declared default for every spec key absent from `params`.
///
/// Keys without defaults stay absent; presence is enforced by
/// [`validate`], not here.
#[must_use]
pub fn bind_defaults(specs: &[ParamSpec], params: &ParamMap) -> ParamMap {
    let mut bound = params.clone();
    for spec in specs {
        if !bound.contains_key(spec.key()) {
            if let Some(default) = spec.default() {
                bound.insert(spec.key(), default.clone());
            }
        }
    }
    bound
}

/// Validate `params` against a route's specs, in declaration order.
///
/// A present key must match its spec's tag exactly; an absent key without a
/// default is `MissingRequired`; an absent key with a default passes (the
/// default is [`bind_defaults`]' job). The first failure short-circuits;
/// errors are not accumulated.
pub fn validate(specs: &[ParamSpec], params: &ParamMap) -> Result<(), NavError> {
    for spec in specs {
        match params.value(spec.key()) {
            Some(value) => {
                if value.value_type() != spec.expected() {
                    return Err(NavError::TypeMismatch(spec.key().to_string()));
                }
            }
            None if spec.default().is_some() => {}
            None => return Err(NavError::MissingRequired(spec.key().to_string())),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_query_percent_decodes_values() {
        let params = parse_query("scheme://host/p?a=1&b=hello%20world");
        assert_eq!(params.get::<String>("a").as_deref(), Some("1"));
        assert_eq!(params.get::<String>("b").as_deref(), Some("hello world"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn parse_query_decodes_once_only() {
        // %2520 is an encoded "%20"; one pass must leave "%20", and '+' is
        // not a space in this codec.
        let params = parse_query("app://x?a=%2520&b=1+2");
        assert_eq!(params.get::<String>("a").as_deref(), Some("%20"));
        assert_eq!(params.get::<String>("b").as_deref(), Some("1+2"));
    }

    #[test]
    fn parse_query_skips_fragment_and_malformed_pairs() {
        let params = parse_query("app://x?a=1&novalue&=2#frag=3");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get::<String>("a").as_deref(), Some("1"));
        assert!(parse_query("app://x").is_empty());
    }

    #[test]
    fn strip_query_drops_query_and_fragment() {
        assert_eq!(strip_query("app://mall?x=1"), "app://mall");
        assert_eq!(strip_query("app://mall#top"), "app://mall");
        assert_eq!(strip_query("app://mall"), "app://mall");
    }

    #[test]
    fn insert_replaces_and_merge_prefers_overrides() {
        let mut base = ParamMap::new();
        base.insert("x", "1");
        base.insert("x", "1b");
        assert_eq!(base.len(), 1);
        assert_eq!(base.get::<String>("x").as_deref(), Some("1b"));

        let overrides = ParamMap::new().with("x", "2").with("y", 7i64);
        let merged = base.merge(&overrides);
        assert_eq!(merged.get::<String>("x").as_deref(), Some("2"));
        assert_eq!(merged.get::<i64>("y"), Some(7));
    }

    #[test]
    fn typed_accessor_is_tag_strict() {
        let params = ParamMap::new().with("n", 3i64);
        assert_eq!(params.get::<i64>("n"), Some(3));
        assert_eq!(params.get::<String>("n"), None);
        assert_eq!(params.get::<i64>("missing"), None);
    }

    #[test]
    fn bind_defaults_fills_only_absent_keys() {
        let specs = vec![
            ParamSpec::required("id", ValueType::Str),
            ParamSpec::with_default("param2", ValueType::Str, "default"),
        ];
        let params = ParamMap::new().with("id", "7");
        let bound = bind_defaults(&specs, &params);
        assert_eq!(bound.get::<String>("param2").as_deref(), Some("default"));
        assert_eq!(bound.get::<String>("id").as_deref(), Some("7"));
    }

    #[test]
    fn validate_checks_declaration_order_and_short_circuits() {
        let specs = vec![
            ParamSpec::required("first", ValueType::Int),
            ParamSpec::required("second", ValueType::Bool),
        ];
        let params = ParamMap::new();
        assert_eq!(
            validate(&specs, &params),
            Err(NavError::MissingRequired("first".into()))
        );
    }

    #[test]
    fn wrong_type_beats_default_fallback() {
        // Supplying param2 with the wrong tag fails; it must not silently
        // fall back to the declared default.
        let specs = vec![ParamSpec::with_default("param2", ValueType::Str, "default")];
        let params = ParamMap::new().with("param2", 5i64);
        assert_eq!(
            validate(&specs, &params),
            Err(NavError::TypeMismatch("param2".into()))
        );
        assert_eq!(validate(&specs, &ParamMap::new()), Ok(()));
    }

    #[test]
    fn callable_values_are_tagged_and_identity_compared() {
        let cb: Callback = Rc::new(|| {});
        let value = ParamValue::from(Rc::clone(&cb));
        assert_eq!(value.value_type(), ValueType::Callable);
        assert_eq!(value, ParamValue::Callable(Rc::clone(&cb)));
        assert_ne!(value, ParamValue::Callable(Rc::new(|| {})));
    }
}
