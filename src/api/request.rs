//! Request descriptors
//!
//! A [`Request`] is the transient, per-call description of one API operation:
//! verb, server-relative path, query parameters and JSON body. Parameter values
//! are optional; `None` and an explicit JSON `null` both mean "not supplied"
//! and never reach the wire.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Field name to optional value
pub type Params = BTreeMap<String, Option<Value>>;

/// Whether a parameter value counts as not supplied
pub fn is_missing(value: &Option<Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Build a [`Params`] map from `(name, value)` pairs
pub fn params<const N: usize>(entries: [(&str, Option<Value>); N]) -> Params {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    /// No published endpoint uses PUT; it exists so retry policies can name it
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Put => reqwest::Method::PUT,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamGroup {
    Query,
    Body,
}

impl ParamGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters split by the part of the request they belong to
pub type GroupedParams = BTreeMap<ParamGroup, Params>;

/// One logical API call
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Params,
    /// `None` sends no body at all; `Some` sends a JSON object
    pub body: Option<Params>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    pub fn json(mut self, body: Params) -> Self {
        self.body = Some(body);
        self
    }

    /// Build a request from validated parameter groups
    pub fn from_groups(method: Method, path: impl Into<String>, mut groups: GroupedParams) -> Self {
        Self {
            method,
            path: path.into(),
            query: groups.remove(&ParamGroup::Query).unwrap_or_default(),
            body: groups.remove(&ParamGroup::Body),
        }
    }
}

/// Remove every entry whose value is missing.
/// Removals are logged at debug level; they are a normal part of optional
/// argument handling.
pub fn strip_nulls(group: ParamGroup, params: &Params) -> Params {
    params
        .iter()
        .filter(|(name, value)| {
            let missing = is_missing(value);
            if missing {
                tracing::debug!("Dropping missing {} argument {}", group, name);
            }
            !missing
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Turn stripped query parameters into wire pairs.
/// Arrays repeat the key once per element; nested objects are sent as JSON text.
pub(crate) fn query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (name, value) in params {
        match value {
            None | Some(Value::Null) => {},
            Some(Value::Array(items)) => {
                for item in items {
                    pairs.push((name.clone(), query_value(item)));
                }
            },
            Some(value) => pairs.push((name.clone(), query_value(value))),
        }
    }
    pairs
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Collapse present parameters into a JSON object
pub(crate) fn json_object(params: &Params) -> Map<String, Value> {
    params
        .iter()
        .filter(|(_, value)| !is_missing(value))
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.clone(), v.clone())))
        .collect()
}
