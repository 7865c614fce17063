//! Query-string serialization for read-style requests.
//!
//! # Design
//! Parameter values are classified once into `QueryValue` and matched
//! exhaustively. Only one level is flattened: arrays repeat their key, and
//! objects contribute their own keys. Anything deeper is sent as JSON text.

use std::borrow::Cow;

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use url::Url;

use crate::codec::{encode_value, is_falsy};

/// What to do with falsy leaves (`null`, `false`, `0`, `""`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalsyPolicy {
    /// Leave falsy values out of the query string.
    #[default]
    Skip,
    /// Append falsy values like any other scalar.
    Keep,
}

/// A single non-container value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
}

impl Scalar<'_> {
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null => Cow::Borrowed("null"),
            Scalar::Bool(true) => Cow::Borrowed("true"),
            Scalar::Bool(false) => Cow::Borrowed("false"),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::String(s) => Cow::Borrowed(s),
        }
    }
}

/// A parameter value, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryValue<'a> {
    Scalar(Scalar<'a>),
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
}

impl<'a> From<&'a Value> for QueryValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => QueryValue::Scalar(Scalar::Null),
            Value::Bool(b) => QueryValue::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => QueryValue::Scalar(Scalar::Number(n)),
            Value::String(s) => QueryValue::Scalar(Scalar::String(s)),
            Value::Array(items) => QueryValue::Sequence(items),
            Value::Object(map) => QueryValue::Mapping(map),
        }
    }
}

/// Appends parameters to a URL's query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySerializer {
    falsy: FalsyPolicy,
}

impl QuerySerializer {
    pub fn new(falsy: FalsyPolicy) -> Self {
        Self { falsy }
    }

    /// Append every parameter, in insertion order.
    pub fn append_all(&self, url: &mut Url, params: &Map<String, Value>) {
        for (key, value) in params {
            self.append(url, key, value);
        }
    }

    /// Append one parameter.
    pub fn append(&self, url: &mut Url, key: &str, value: &Value) {
        match QueryValue::from(value) {
            QueryValue::Scalar(scalar) => self.append_scalar(url, key, value, scalar),
            QueryValue::Sequence(items) => {
                for item in items {
                    self.append_leaf(url, key, item);
                }
            }
            QueryValue::Mapping(map) => {
                for (nested_key, item) in map {
                    self.append_leaf(url, nested_key, item);
                }
            }
        }
    }

    fn append_leaf(&self, url: &mut Url, key: &str, value: &Value) {
        match QueryValue::from(value) {
            QueryValue::Scalar(scalar) => self.append_scalar(url, key, value, scalar),
            QueryValue::Sequence(_) | QueryValue::Mapping(_) => {
                url.query_pairs_mut().append_pair(key, &encode_value(value));
            }
        }
    }

    fn append_scalar(&self, url: &mut Url, key: &str, value: &Value, scalar: Scalar<'_>) {
        if self.falsy == FalsyPolicy::Skip && is_falsy(value) {
            trace!("skipping falsy query value for {key:?}");
            return;
        }
        url.query_pairs_mut().append_pair(key, &scalar.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn serialize(falsy: FalsyPolicy, params: Value) -> Option<String> {
        let mut url = Url::parse("http://localhost/x").unwrap();
        let Value::Object(map) = params else {
            panic!("params must be an object");
        };
        QuerySerializer::new(falsy).append_all(&mut url, &map);
        url.query().map(str::to_string)
    }

    #[test]
    fn scalars_and_arrays_keep_order() {
        let query = serialize(FalsyPolicy::Skip, json!({"a": 1, "b": [2, 3]}));
        assert_eq!(query.as_deref(), Some("a=1&b=2&b=3"));
    }

    #[test]
    fn objects_flatten_one_level_using_their_own_keys() {
        let query = serialize(
            FalsyPolicy::Skip,
            json!({"filter": {"q": "x", "tags": ["a"]}}),
        );
        assert_eq!(query.as_deref(), Some("q=x&tags=%5B%22a%22%5D"));
    }

    #[test]
    fn nested_containers_in_arrays_are_json_encoded() {
        let query = serialize(FalsyPolicy::Skip, json!({"p": [{"k": 1}, [1, 2]]}));
        assert_eq!(
            query.as_deref(),
            Some("p=%7B%22k%22%3A1%7D&p=%5B1%2C2%5D")
        );
    }

    #[test]
    fn skip_policy_drops_falsy_leaves() {
        let query = serialize(
            FalsyPolicy::Skip,
            json!({"z": 0, "f": false, "e": "", "n": null, "keep": "y", "arr": [0, 1]}),
        );
        assert_eq!(query.as_deref(), Some("keep=y&arr=1"));
    }

    #[test]
    fn keep_policy_appends_falsy_leaves() {
        let query = serialize(
            FalsyPolicy::Keep,
            json!({"z": 0, "f": false, "e": "", "n": null}),
        );
        assert_eq!(query.as_deref(), Some("z=0&f=false&e=&n=null"));
    }

    #[test]
    fn zero_float_is_skipped() {
        let query = serialize(FalsyPolicy::Skip, json!({"a": 0.0, "b": 0.5}));
        assert_eq!(query.as_deref(), Some("b=0.5"));
    }

    #[test]
    fn skip_policy_drops_falsy_nested_object_values() {
        let query = serialize(FalsyPolicy::Skip, json!({"filter": {"a": 0, "b": "y", "c": null}}));
        assert_eq!(query.as_deref(), Some("b=y"));
    }

    #[test]
    fn keep_policy_appends_falsy_nested_object_values() {
        let query = serialize(FalsyPolicy::Keep, json!({"filter": {"a": 0, "b": "y", "c": false}}));
        assert_eq!(query.as_deref(), Some("a=0&b=y&c=false"));
    }

    #[test]
    fn keep_policy_appends_falsy_array_elements() {
        let query = serialize(FalsyPolicy::Keep, json!({"ids": [0, 1, ""]}));
        assert_eq!(query.as_deref(), Some("ids=0&ids=1&ids="));
    }

    #[test]
    fn empty_containers_append_nothing() {
        let query = serialize(FalsyPolicy::Keep, json!({"a": [], "b": {}}));
        assert_eq!(query, None);
    }

    #[test]
    fn spaces_are_form_encoded() {
        let query = serialize(FalsyPolicy::Skip, json!({"q": "hello world&more"}));
        assert_eq!(query.as_deref(), Some("q=hello+world%26more"));
    }

    #[test]
    fn appends_after_existing_query() {
        let mut url = Url::parse("http://localhost/x?page=2").unwrap();
        let Value::Object(map) = json!({"a": "b"}) else { unreachable!() };
        QuerySerializer::default().append_all(&mut url, &map);
        assert_eq!(url.query(), Some("page=2&a=b"));
    }
}
