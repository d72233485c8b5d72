//! Run logger: numbered progress on stdout, phase timing and memory on stderr
//!
//! Memory is the resident set size from /proc/self/status (0 where that file
//! does not exist).

use std::fs;
use std::time::Instant;

/// Current RSS in megabytes
pub fn rss_mb() -> f64 {
    let Ok(status) = fs::read_to_string("/proc/self/status") else {
        return 0.0;
    };

    // Format: "VmRSS:    123456 kB"
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb as f64 / 1024.0)
        .unwrap_or(0.0)
}

/// Logger for one pipeline run
pub struct RunLogger {
    start: Instant,
    phase_start: Instant,
    total_steps: usize,
}

impl RunLogger {
    pub fn new(total_steps: usize) -> Self {
        let now = Instant::now();
        RunLogger {
            start: now,
            phase_start: now,
            total_steps,
        }
    }

    /// Announce step `n` of the run
    pub fn step(&mut self, n: usize, message: impl AsRef<str>) {
        println!("\n[{}/{}] {}", n, self.total_steps, message.as_ref());
        self.phase_start = Instant::now();
    }

    /// Report a completed step with its timing and memory
    pub fn done(&self, message: impl AsRef<str>) {
        println!("✓ {}", message.as_ref());
        eprintln!(
            "[PHASE @{:.3}s] +{:.3}s, RSS {:.2} MB: {}",
            self.start.elapsed().as_secs_f64(),
            self.phase_start.elapsed().as_secs_f64(),
            rss_mb(),
            message.as_ref()
        );
    }

    /// Indented detail line under the current step
    pub fn detail(&self, message: impl AsRef<str>) {
        println!("  {}", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        eprintln!("⚠ {}", message.as_ref());
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rss_is_non_negative() {
        assert!(rss_mb() >= 0.0);
    }

    #[test]
    fn test_elapsed_grows() {
        let mut log = RunLogger::new(2);
        log.step(1, "first");
        log.done("first");
        assert!(log.elapsed_secs() >= 0.0);
    }
}
