use serde::{Deserialize, Serialize};

/// Config for building a [`CanonicalIndex`](crate::CanonicalIndex).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexConfig {
    /// Number of leading characters shared by members of a prefix block.
    /// Measured in characters, not bytes. Default: 10.
    #[serde(default = "IndexConfig::default_prefix_len")]
    pub prefix_len: usize,

    /// Hard cap on registry size for in-memory indexing. Exceeding it fails
    /// the build before any matching starts. `None` means uncapped: the
    /// caller vouches that the registry fits.
    #[serde(default)]
    pub max_records: Option<usize>,
}

impl IndexConfig {
    pub(crate) fn default_prefix_len() -> usize {
        10
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix_len(mut self, prefix_len: usize) -> Self {
        self.prefix_len = prefix_len;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            prefix_len: Self::default_prefix_len(),
            max_records: None,
        }
    }
}
