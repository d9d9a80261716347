//! Coarse resident-memory sampling.
//!
//! Reads the kernel's high-water mark from `/proc/self/status`. On other
//! platforms every sample is `None`.

/// Tracks the largest resident set seen across explicit samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySampler {
    peak_kb: Option<u64>,
}

impl MemorySampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take one sample. Returns the sampled value in kilobytes.
    pub fn sample(&mut self) -> Option<u64> {
        let current = read_status_kb("VmHWM:").or_else(|| read_status_kb("VmRSS:"));
        if let Some(kb) = current {
            self.peak_kb = Some(self.peak_kb.map_or(kb, |p| p.max(kb)));
        }
        current
    }

    pub fn peak_kb(&self) -> Option<u64> {
        self.peak_kb
    }

    pub fn peak_mb(&self) -> Option<f64> {
        self.peak_kb.map(|kb| kb as f64 / 1024.0)
    }
}

fn read_status_kb(key: &str) -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_status_kb(&status, key)
}

/// Parse a `Key:   1234 kB` line.
fn parse_status_kb(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix(key))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
}
