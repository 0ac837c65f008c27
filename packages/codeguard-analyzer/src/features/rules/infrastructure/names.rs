//! Flat defined/used name bookkeeping for the UnusedVariable detector

use std::collections::HashSet;

/// How an identifier occurrence touches its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    Load,
    Store,
    Del,
}

/// Names written and read anywhere in a file, ignoring scopes
#[derive(Debug, Default)]
pub struct NameUsage {
    /// First definition line per name, in first-definition order
    defined: Vec<(String, u32)>,
    defined_names: HashSet<String>,
    used: HashSet<String>,
}

impl NameUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, context: NameContext, line: u32) {
        match context {
            NameContext::Store => {
                if self.defined_names.insert(name.to_string()) {
                    self.defined.push((name.to_string(), line));
                }
            }
            NameContext::Load => {
                self.used.insert(name.to_string());
            }
            NameContext::Del => {}
        }
    }

    /// `defined - used`, in first-definition order
    pub fn unused(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.defined
            .iter()
            .filter(|(name, _)| !self.used.contains(name))
            .map(|(name, line)| (name.as_str(), *line))
    }
}
