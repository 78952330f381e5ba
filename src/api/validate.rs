//! Client-side parameter validation
//!
//! Required fields are checked before anything is sent, so a call that can
//! only fail server-side never costs a round trip.

use super::request::{is_missing, GroupedParams, Method, Params};
use crate::error::{Error, Result};

/// Drop missing optional parameters, failing on a missing required one.
///
/// The result holds only concrete values; present entries are passed through
/// untouched. Pure and deterministic.
pub fn validate(
    method: Method,
    path: &str,
    grouped: &GroupedParams,
    required: &[&str],
) -> Result<GroupedParams> {
    let mut cleaned = GroupedParams::new();

    for (group, fields) in grouped {
        let mut kept = Params::new();
        for (name, value) in fields {
            match value {
                Some(v) if !is_missing(value) => {
                    kept.insert(name.clone(), Some(v.clone()));
                },
                _ if required.contains(&name.as_str()) => {
                    return Err(Error::MissingRequiredField {
                        field: name.clone(),
                        method: method.to_string(),
                        path: path.to_string(),
                    });
                },
                _ => {
                    tracing::debug!("Dropping missing {} argument {}", group, name);
                },
            }
        }
        cleaned.insert(*group, kept);
    }

    Ok(cleaned)
}
