//! Bounded worker pool for probe execution.
//!
//! Fans a job list out across concurrent tasks using the tokio runtime,
//! with a semaphore capping how many probes are in flight at once.

use super::{ProbeJob, ProbeOutcome, Prober};
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Progress callback: `(completed, total)`, invoked exactly once per
/// finished job. Completion order is non-deterministic; callers must only
/// rely on `completed` increasing monotonically from 1 to `total`.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Execute every job with bounded concurrency and return one outcome per job.
///
/// Guarantees:
/// - at most `limit` probes execute concurrently (a limit of 0 is treated as 1)
/// - every job runs exactly once; the returned vector has `jobs.len()` entries
/// - the returned order is completion order, not submission order — callers
///   that need a stable order sort via [`super::Aggregator`]
///
/// Individual probe failures are captured in their outcome and never abort
/// the batch.
pub async fn run_probes<P>(
    prober: Arc<P>,
    jobs: Vec<ProbeJob<P::Key>>,
    limit: usize,
    on_progress: Option<ProgressFn>,
) -> Vec<ProbeOutcome<P::Key>>
where
    P: Prober + 'static,
{
    let total = jobs.len() as u64;
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let completed = Arc::new(AtomicU64::new(0));

    stream::iter(jobs)
        .map(|job| {
            let prober = Arc::clone(&prober);
            let sem = Arc::clone(&semaphore);
            let completed = Arc::clone(&completed);
            let on_progress = on_progress.clone();

            async move {
                // Acquire semaphore permit
                let _permit = sem.acquire().await.unwrap();

                let outcome = prober.probe(&job).await;

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref cb) = on_progress {
                    cb(done, total);
                }

                outcome
            }
        })
        .buffer_unordered(1000) // High buffering; the semaphore controls actual concurrency
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FailureKind;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Stub prober that records call counts and in-flight concurrency.
    struct StubProber {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl StubProber {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Prober for StubProber {
        type Key = u32;

        async fn probe(&self, job: &ProbeJob<u32>) -> ProbeOutcome<u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(2)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if job.key % 2 == 0 {
                ProbeOutcome::found(job.key, BTreeMap::new())
            } else {
                ProbeOutcome::missed(job.key, FailureKind::Unreachable)
            }
        }
    }

    fn make_jobs(n: u32) -> Vec<ProbeJob<u32>> {
        (0..n)
            .map(|i| ProbeJob::new(i, "stub", Duration::from_millis(50)))
            .collect()
    }

    #[tokio::test]
    async fn test_every_job_yields_one_outcome() {
        for limit in [1usize, 5, 50] {
            let prober = Arc::new(StubProber::new());
            let outcomes = run_probes(Arc::clone(&prober), make_jobs(100), limit, None).await;

            assert_eq!(outcomes.len(), 100, "limit {}", limit);
            assert_eq!(prober.calls.load(Ordering::SeqCst), 100, "limit {}", limit);

            let mut keys: Vec<u32> = outcomes.iter().map(|o| o.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), 100, "each job ran exactly once");
        }
    }

    #[tokio::test]
    async fn test_concurrency_stays_bounded() {
        let prober = Arc::new(StubProber::new());
        run_probes(Arc::clone(&prober), make_jobs(60), 5, None).await;

        assert!(prober.max_in_flight.load(Ordering::SeqCst) <= 5);
    }

    #[tokio::test]
    async fn test_progress_fires_once_per_job() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let last_total = Arc::new(AtomicU64::new(0));

        let cb: ProgressFn = {
            let ticks = Arc::clone(&ticks);
            let last_total = Arc::clone(&last_total);
            Arc::new(move |_, total| {
                ticks.fetch_add(1, Ordering::SeqCst);
                last_total.store(total, Ordering::SeqCst);
            })
        };

        let prober = Arc::new(StubProber::new());
        run_probes(prober, make_jobs(37), 8, Some(cb)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 37);
        assert_eq!(last_total.load(Ordering::SeqCst), 37);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let prober = Arc::new(StubProber::new());
        let outcomes = run_probes(prober, Vec::new(), 10, None).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_zero_limit_treated_as_one() {
        let prober = Arc::new(StubProber::new());
        let outcomes = run_probes(Arc::clone(&prober), make_jobs(4), 0, None).await;
        assert_eq!(outcomes.len(), 4);
        assert_eq!(prober.max_in_flight.load(Ordering::SeqCst), 1);
    }
}
