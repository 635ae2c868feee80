use crc32fast::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hash arbitrary input into a short hex seed
pub fn get_seed(input: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Seed that differs per call, even within the same nanosecond
pub fn fresh_seed() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    let now = chrono::Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());
    get_seed(&format!("{}-{}-{}", nanos, process_id(), count))
}

#[cfg(not(target_arch = "wasm32"))]
fn process_id() -> u32 {
    std::process::id()
}

// No process ids in the browser
#[cfg(target_arch = "wasm32")]
fn process_id() -> u32 {
    0
}

/// Sequential ID generator for elements within an editing session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::from_seed(fresh_seed())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
