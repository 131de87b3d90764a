//! Label table for mapping model output indexes to class names.
//!
//! The table is loaded once from a line-delimited text asset and is immutable
//! afterwards; inference calls share it read-only.

use crate::core::errors::ClassifyError;
use std::io::BufRead;
use std::path::Path;

/// An ordered, index-addressed list of class names.
///
/// Entry order matches the model's output dimension: index `i` in the output
/// scores corresponds to `name_at(i)`. Duplicates are allowed; blank lines in
/// the source are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    /// Creates a label table from an already-ordered list of names.
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Loads a label table from a line-delimited text file.
    ///
    /// One entry per non-empty line, in file order.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the label file.
    ///
    /// # Returns
    ///
    /// A Result containing the loaded LabelTable or a ClassifyError.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ClassifyError::ConfigError {
            message: format!("failed to load labels from {}: {e}", path.display()),
        })?;

        Ok(Self::parse_lines(content.lines()))
    }

    /// Loads a label table from any buffered reader.
    ///
    /// Useful when the label asset is embedded rather than on disk.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ClassifyError> {
        let mut names = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                names.push(line);
            }
        }
        Ok(Self { names })
    }

    fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let names = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect();
        Self { names }
    }

    /// Returns the class name at the given output index.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::IndexOutOfRange`] if `index` is outside
    /// `[0, len)`.
    pub fn name_at(&self, index: usize) -> Result<&str, ClassifyError> {
        self.names
            .get(index)
            .map(|name| name.as_str())
            .ok_or_else(|| ClassifyError::index_out_of_range(index, self.names.len()))
    }

    /// Returns the class name at the given index, or None if out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|name| name.as_str())
    }

    /// Returns the number of classes in the table.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table holds no classes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the class names in table order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.as_str())
    }
}
