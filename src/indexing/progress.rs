//! Statistics collected while building the declaration index

use serde::Serialize;
use std::time::{Duration, Instant};

/// Statistics collected during indexing
#[derive(Debug, Default, Clone, Serialize)]
pub struct IndexStats {
    /// Class records returned by the artifact scan
    pub classes_scanned: usize,

    /// Records without any declaration metadata
    pub classes_without_metadata: usize,

    /// Records of a binary name already seen in an earlier record
    pub duplicate_classes: usize,

    /// Records whose metadata could not be decoded
    pub classes_failed: usize,

    /// Entries holding a class declaration
    pub class_declarations: usize,

    /// Package facades (file facades and multi-file class parts)
    pub package_facades: usize,

    /// Entries with metadata that declares no class
    pub other_entries: usize,

    /// Companion references that pointed outside the index
    pub dropped_companions: usize,

    /// Time elapsed during indexing
    #[serde(skip)]
    pub elapsed: Duration,

    #[serde(skip)]
    start_time: Option<Instant>,
}

impl IndexStats {
    /// Create new stats and start timing
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Stop timing and record elapsed time
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = start.elapsed();
            self.start_time = None;
        }
    }

    pub fn indexed_entries(&self) -> usize {
        self.class_declarations + self.package_facades + self.other_entries
    }

    /// Display the statistics in a human-readable format
    pub fn display(&self) {
        println!("Declaration index:");
        println!("  Class records scanned: {}", self.classes_scanned);
        println!("  Without metadata: {}", self.classes_without_metadata);
        if self.duplicate_classes > 0 {
            println!("  Duplicate class records: {}", self.duplicate_classes);
        }
        println!("  Undecodable metadata: {}", self.classes_failed);
        println!("  Classes: {}", self.class_declarations);
        println!("  Package facades: {}", self.package_facades);
        println!("  Other entries: {}", self.other_entries);
        if self.dropped_companions > 0 {
            println!("  Dropped companion links: {}", self.dropped_companions);
        }
        println!("  Time elapsed: {:.2}s", self.elapsed.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_entries_sum() {
        let stats = IndexStats {
            class_declarations: 3,
            package_facades: 2,
            other_entries: 1,
            ..Default::default()
        };
        assert_eq!(stats.indexed_entries(), 6);
    }

    #[test]
    fn test_stop_timing_records_elapsed_once() {
        let mut stats = IndexStats::new();
        stats.stop_timing();
        let first = stats.elapsed;
        stats.stop_timing();
        assert_eq!(stats.elapsed, first);
    }
}
