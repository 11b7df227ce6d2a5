use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request generation counter.
///
/// Every fetch takes a fresh generation before it starts. Reducers compare
/// the generation carried by a result against the one recorded in state and
/// drop anything older, so the last request issued always wins regardless
/// of completion order.
#[derive(Debug)]
pub struct RequestSeq {
    next: AtomicU64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Take the next generation. Never returns 0.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The most recently issued generation, or 0 if none.
    pub fn latest(&self) -> u64 {
        self.next.load(Ordering::SeqCst) - 1
    }
}

impl Default for RequestSeq {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn issues_increasing_generations() {
        let seq = RequestSeq::new();
        assert_eq!(seq.latest(), 0);
        let a = seq.issue();
        let b = seq.issue();
        assert!(a >= 1);
        assert!(b > a);
        assert_eq!(seq.latest(), b);
    }

    #[test]
    fn concurrent_issue_is_unique() {
        let seq = Arc::new(RequestSeq::new());
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || (0..50).map(|_| seq.issue()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<u64> = threads.into_iter().flat_map(|t| t.join().unwrap()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 200);
    }
}
