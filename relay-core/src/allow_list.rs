//! Staff allow-list: the fixed set of user ids allowed to activate a staff session.
//!
//! Source format is line-oriented: one numeric id per line, `#` starts a comment, blank lines are
//! skipped. The leading digit run of a line is the id; anything after it is ignored. A non-comment
//! line that does not start with a digit is rejected.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::{RelayError, Result};

/// Read-only set of staff ids, parsed once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: HashSet<i64>,
}

impl AllowList {
    /// Builds an allow-list from ids directly.
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parses allow-list text. `source` names the resource in error messages.
    pub fn parse(text: &str, source: &str) -> Result<Self> {
        let mut ids = HashSet::new();
        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let clean = line.split('#').next().unwrap_or_default().trim();
            if clean.is_empty() {
                continue;
            }
            if !clean.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(RelayError::ConfigurationMalformed(format!(
                    "{}: line {} doesn't start with a number: {}",
                    source,
                    line_number,
                    line.trim()
                )));
            }
            let digits: String = clean.chars().take_while(|c| c.is_ascii_digit()).collect();
            let id = digits.parse::<i64>().map_err(|e| {
                RelayError::ConfigurationMalformed(format!(
                    "{}: line {} has an invalid id {}: {}",
                    source, line_number, digits, e
                ))
            })?;
            ids.insert(id);
        }
        Ok(Self { ids })
    }

    /// Reads and parses the allow-list file. A missing file is [`RelayError::ConfigurationMissing`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RelayError::ConfigurationMissing(format!(
                "could not find allowed ids file at {}",
                path.display()
            )),
            _ => RelayError::Io(e),
        })?;
        let list = Self::parse(&text, &path.display().to_string())?;
        info!(path = %path.display(), staff_ids = list.len(), "Loaded staff allow-list");
        Ok(list)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
