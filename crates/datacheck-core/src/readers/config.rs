use std::time::Duration;

/// Options for loading a delimited text source.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub delimiter: u8,
    pub batch_size: usize,
    read_chunk_size: usize,
    timeout: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            batch_size: 8 * 1024,
            read_chunk_size: 64 * 1024,
            timeout: None,
        }
    }
}

impl LoaderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn read_chunk_size(&self) -> usize {
        self.read_chunk_size
    }
}

pub struct LoaderConfigBuilder {
    delimiter: u8,
    batch_size: usize,
    read_chunk_size: usize,
    timeout: Option<Duration>,
}

impl Default for LoaderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderConfigBuilder {
    /// Create a new [`LoaderConfigBuilder`]
    pub fn new() -> Self {
        let config = LoaderConfig::default();
        Self {
            delimiter: config.delimiter,
            batch_size: config.batch_size,
            read_chunk_size: config.read_chunk_size,
            timeout: config.timeout,
        }
    }

    /// Build a [`LoaderConfig`]
    pub fn build(self) -> LoaderConfig {
        LoaderConfig {
            delimiter: self.delimiter,
            batch_size: self.batch_size.max(1),
            read_chunk_size: self.read_chunk_size.max(1),
            timeout: self.timeout,
        }
    }

    pub fn with_delimiter(self, delimiter: u8) -> Self {
        Self { delimiter, ..self }
    }

    pub fn with_batch_size(self, batch_size: usize) -> Self {
        Self { batch_size, ..self }
    }

    pub fn with_read_chunk_size(self, read_chunk_size: usize) -> Self {
        Self {
            read_chunk_size,
            ..self
        }
    }

    /// Give up reading a streamed source after `timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }
}
