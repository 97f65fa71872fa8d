use std::fmt;

/// An insertion-ordered label → value mapping.
///
/// Labels keep their first-insertion position; setting an existing label
/// overwrites its value in place. The response model borrows a seed report
/// immutably and returns a fresh overlaid copy, so a caller can keep its
/// seed and evaluate several designs concurrently without aliasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, f64)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `label` to `value`, overwriting in place if already present.
    pub fn set(&mut self, label: &str, value: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == label) {
            entry.1 = value;
        } else {
            self.entries.push((label.to_owned(), value));
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == label)
            .map(|&(_, v)| v)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.entries {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}
