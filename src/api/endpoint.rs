//! Endpoint definitions
//!
//! An [`Endpoint`] pairs a verb and path with the fields the API insists on.
//! GET and DELETE calls carry their parameters in the query string, POST calls
//! in the JSON body.

use super::request::{GroupedParams, Method, ParamGroup, Params};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    /// Wire names that must have a value before the call is sent
    pub required: &'static [&'static str],
}

impl Endpoint {
    pub const fn get(path: &'static str, required: &'static [&'static str]) -> Self {
        Self {
            method: Method::Get,
            path,
            required,
        }
    }

    pub const fn post(path: &'static str, required: &'static [&'static str]) -> Self {
        Self {
            method: Method::Post,
            path,
            required,
        }
    }

    pub const fn delete(path: &'static str, required: &'static [&'static str]) -> Self {
        Self {
            method: Method::Delete,
            path,
            required,
        }
    }

    /// The group this endpoint's parameters travel in
    pub fn param_group(&self) -> ParamGroup {
        match self.method {
            Method::Post | Method::Put => ParamGroup::Body,
            Method::Get | Method::Delete => ParamGroup::Query,
        }
    }

    /// Place parameters in the group matching the verb.
    /// POST endpoints always get a body group, even when empty.
    pub fn group(&self, params: Params) -> GroupedParams {
        let group = self.param_group();
        if params.is_empty() && group == ParamGroup::Query {
            return GroupedParams::new();
        }
        GroupedParams::from([(group, params)])
    }
}
