#![forbid(unsafe_code)]

//! Rule lists in the JSON shape a rule source stores them in.
//!
//! ```json
//! [
//!   {
//!     "screen_class": "com.example.MainActivity",
//!     "view_class": "android.widget.ImageView",
//!     "bounds": { "x": 0, "y": 0, "width": 1080, "height": 180 },
//!     "depth": 2,
//!     "visibility": "GONE"
//!   }
//! ]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use veil_core::ViewRule;

/// Failure loading a rule fixture.
#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read rule fixture: {e}"),
            Self::Parse(e) => write!(f, "invalid rule fixture: {e}"),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for FixtureError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Parse a JSON array of rules.
pub fn rules_from_json(json: &str) -> Result<Vec<ViewRule>, FixtureError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON rule file.
pub fn rules_from_file(path: impl AsRef<Path>) -> Result<Vec<ViewRule>, FixtureError> {
    let text = fs::read_to_string(path)?;
    rules_from_json(&text)
}

/// Serialize rules back to pretty JSON.
pub fn rules_to_json(rules: &[ViewRule]) -> Result<String, FixtureError> {
    Ok(serde_json::to_string_pretty(rules)?)
}
