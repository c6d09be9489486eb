use std::fmt;

/// A LIMIT clause: a row count with an optional leading offset.
///
/// Renders as `LIMIT count` or `LIMIT offset,count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub count: u64,
    pub offset: Option<u64>,
}

impl Limit {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            offset: None,
        }
    }

    pub fn with_offset(offset: u64, count: u64) -> Self {
        Self {
            count,
            offset: Some(offset),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "LIMIT {},{}", offset, self.count),
            None => write!(f, "LIMIT {}", self.count),
        }
    }
}
