use std::collections::HashMap;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

const ASSIGNMENT_OPERATOR: char = '=';

/// Variable assignments extracted from a `.env` file.
///
/// Keys are unique; when the same key is assigned more than once, the last
/// assignment wins. Iteration order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvMapping {
  entries: HashMap<String, String>,
}

impl From<&str> for EnvMapping {
  fn from(s: &str) -> Self {
    #[cfg(feature = "tracing")]
    debug!("Parsing env file with {} lines", s.lines().count());

    let mut entries = HashMap::new();

    for line in s.lines() {
      #[cfg(feature = "tracing")]
      trace!("Parsing line: {:?}", line);

      if let Some((key, value)) = split_assignment(line) {
        #[cfg(feature = "tracing")]
        trace!("Found assignment: key={}, value={:?}", key, value);

        entries.insert(key.to_string(), value.to_string());
      }
    }

    #[cfg(feature = "tracing")]
    debug!("Parsed {} variables", entries.len());

    Self { entries }
  }
}

impl EnvMapping {
  /// Parses raw file bytes, decoding as UTF-8 with replacement characters
  /// for malformed sequences.
  pub fn from_bytes(bytes: &[u8]) -> Self {
    Self::from(String::from_utf8_lossy(bytes).as_ref())
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .entries
      .iter()
      .map(|(key, value)| (key.as_str(), value.as_str()))
  }

  /// Folds `other` into `self`; entries of `other` overwrite entries of
  /// `self` for the same key.
  pub fn merge(&mut self, other: EnvMapping) {
    self.entries.extend(other.entries);
  }
}

/// Splits a line into its key and value parts.
///
/// A line is an assignment when everything before the first `=` is one or
/// more word characters. The value is the untouched remainder of the line,
/// which may be empty or contain further `=` characters.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
  let (key, value) = line.split_once(ASSIGNMENT_OPERATOR)?;

  if key.is_empty() || !key.chars().all(is_word_char) {
    return None;
  }

  Some((key, value))
}

fn is_word_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}
