// Demo mode: serve generated records instead of calling the network
//
// Useful for trying the table offline. The records are deterministic so a
// demo session always starts from the same collection.
//
// Run with: POSTTABLE_DEMO=1 cargo run --release

use crate::engine::{FetchError, RecordSource};
use crate::model::Record;
use std::time::Duration;
use tokio::time::sleep;

const WORDS: [&str; 16] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua",
];

/// Offline record source
pub struct DemoSource {
    count: usize,
    latency: Duration,
}

impl DemoSource {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            latency: Duration::from_millis(600),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl RecordSource for DemoSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn fetch_all(&self, endpoint: &str) -> Result<Vec<Record>, FetchError> {
        // Let the loading state show for a moment
        sleep(self.latency).await;
        tracing::debug!("Generating {} demo records for {}", self.count, endpoint);
        Ok(generate_records(self.count))
    }
}

/// Build `count` records with ids starting at 1
pub fn generate_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let title = phrase(i, 3 + i % 4);
            let body = phrase(i * 7 + 3, 12 + i % 9);
            Record::new(i as i64 + 1, title, body)
        })
        .collect()
}

fn phrase(seed: usize, len: usize) -> String {
    (0..len)
        .map(|n| WORDS[(seed * 31 + n * 17 + n * n) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_sequential() {
        let records = generate_records(100);
        assert_eq!(records.len(), 100);
        assert!(records.iter().enumerate().all(|(i, r)| r.id == i as i64 + 1));
        assert!(records.iter().all(|r| !r.title.is_empty() && !r.body.is_empty()));
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_records(20), generate_records(20));
    }

    #[tokio::test]
    async fn test_demo_source_fetch() {
        let source = DemoSource::new(5).with_latency(Duration::ZERO);
        let records = source.fetch_all("/posts").await.unwrap();
        assert_eq!(records.len(), 5);
    }
}
