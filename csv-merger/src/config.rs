//! Configuration for a merge run.

/// Configuration for a merge run.
#[derive(Debug, Clone)]
pub struct MergerConfig {
    /// Initial capacity for the key set (optimization).
    pub key_set_initial_capacity: usize,

    /// Fixed timestamp to stamp on appended rows.
    ///
    /// If `None`, the wall clock is captured once at the start of the run and
    /// applied identically to every appended row.
    pub timestamp: Option<String>,
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            key_set_initial_capacity: 1024,
            timestamp: None,
        }
    }
}

impl MergerConfig {
    /// Sets the initial key set capacity.
    pub fn with_key_set_capacity(mut self, capacity: usize) -> Self {
        self.key_set_initial_capacity = capacity;
        self
    }

    /// Pins the run timestamp instead of capturing the wall clock.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
