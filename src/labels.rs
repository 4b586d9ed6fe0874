//! The ordered class-name table the network was trained against.

use std::io::BufRead;
use std::path::Path;
use std::{fs, io};

use crate::errors::LabelingResult;

/// Class names, one per output of the network, in training order.
///
/// The on-disk format is the one shipped with the frozen graph releases:
/// one label per line, line number == class index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> LabelingResult<LabelTable> {
        Self::from_reader(io::BufReader::new(fs::File::open(path)?))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> LabelingResult<LabelTable> {
        let names = reader.lines().collect::<io::Result<Vec<String>>>()?;
        Ok(LabelTable { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, class: usize) -> Option<&str> {
        self.names.get(class).map(|s| s.as_str())
    }
}

impl From<Vec<String>> for LabelTable {
    fn from(names: Vec<String>) -> LabelTable {
        LabelTable { names }
    }
}
