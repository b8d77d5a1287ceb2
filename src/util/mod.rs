use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Error;

/// Work as `Utc::now()`
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current date in UTC.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Fetch a required query / body param.
pub fn require<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a String, Error> {
    params
        .get(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::ParamMissing(name.into()))
}

/// Parse an id given by client, mapping failures to a param error.
pub fn parse_uuid(name: &str, value: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| Error::ParamError(format!("{} is not a valid id", name)))
}
