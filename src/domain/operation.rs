use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the API operation a schema belongs to, carried by
/// "schema too complex" failures so callers can tell which endpoint's
/// documentation blew the sampling budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// HTTP method, e.g. `GET`
    pub method: String,
    /// Templated request path, e.g. `/pets/{petId}`
    pub path: String,
}

impl Operation {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
