//! Sequential and concurrent batch sorting

use std::fmt;
use std::time::Instant;

use futures::future::join_all;

use crate::error::{Error, Result};
use crate::types::ResponsePayload;

/// How a batch is sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One sequence after another on a single blocking task
    Sequential,
    /// One blocking task per sequence, joined before returning
    Concurrent,
}

impl Strategy {
    /// Sort every sequence in `arrays` with this strategy
    pub async fn run(&self, arrays: &[Vec<i64>]) -> Result<Vec<Vec<i64>>> {
        match self {
            Strategy::Sequential => {
                if arrays.is_empty() {
                    return Ok(Vec::new());
                }
                let owned = arrays.to_vec();
                Ok(tokio::task::spawn_blocking(move || sort_in_place(owned)).await?)
            }
            Strategy::Concurrent => sort_concurrent(arrays).await,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequential => write!(f, "sequential"),
            Strategy::Concurrent => write!(f, "concurrent"),
        }
    }
}

/// Sort a copy of each sequence in order, on the current thread.
pub fn sort_sequential(arrays: &[Vec<i64>]) -> Vec<Vec<i64>> {
    arrays.iter().map(|arr| sorted_copy(arr)).collect()
}

/// Sort a copy of each sequence on its own blocking task.
///
/// Every sequence gets a unit of work regardless of batch size. Results come
/// back through each task's join handle and are collected in input order, so
/// the output matches [`sort_sequential`] whatever order the tasks finish in.
pub async fn sort_concurrent(arrays: &[Vec<i64>]) -> Result<Vec<Vec<i64>>> {
    if arrays.is_empty() {
        return Ok(Vec::new());
    }

    let handles = arrays.iter().map(|arr| {
        let arr = arr.clone();
        tokio::task::spawn_blocking(move || {
            let mut arr = arr;
            arr.sort_unstable();
            arr
        })
    });

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.map_err(Error::from))
        .collect()
}

/// Run `strategy` over `arrays`, timing the sort phase only.
pub async fn timed(strategy: Strategy, arrays: &[Vec<i64>]) -> Result<ResponsePayload> {
    let start = Instant::now();
    let sorted_arrays = strategy.run(arrays).await?;
    let elapsed = start.elapsed();

    Ok(ResponsePayload {
        sorted_arrays,
        time_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
    })
}

fn sort_in_place(mut arrays: Vec<Vec<i64>>) -> Vec<Vec<i64>> {
    for arr in &mut arrays {
        arr.sort_unstable();
    }
    arrays
}

fn sorted_copy(arr: &[i64]) -> Vec<i64> {
    let mut sorted = arr.to_vec();
    sorted.sort_unstable();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn sample() -> Vec<Vec<i64>> {
        vec![
            vec![3, 1, 2],
            vec![],
            vec![5],
            vec![9, -4, 9, 0, i64::MIN, i64::MAX, 7],
        ]
    }

    fn is_sorted(arr: &[i64]) -> bool {
        arr.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_sequential_basic() {
        let sorted = sort_sequential(&sample());
        assert_eq!(sorted[0], vec![1, 2, 3]);
        assert!(sorted[1].is_empty());
        assert_eq!(sorted[2], vec![5]);
        assert_eq!(sorted[3], vec![i64::MIN, -4, 0, 7, 9, 9, i64::MAX]);
    }

    #[test]
    fn test_sequential_does_not_mutate_input() {
        let input = sample();
        let before = input.clone();
        let _ = sort_sequential(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_sequential_idempotent() {
        let once = sort_sequential(&sample());
        let twice = sort_sequential(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sequential_empty() {
        assert!(sort_sequential(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let input = sample();
        let concurrent = sort_concurrent(&input).await.unwrap();
        assert_eq!(concurrent, sort_sequential(&input));
    }

    #[tokio::test]
    async fn test_concurrent_empty() {
        let sorted = sort_concurrent(&[]).await.unwrap();
        assert!(sorted.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_keeps_positions_with_wide_fanout() {
        // Sequences of very different sizes finish out of order.
        let input: Vec<Vec<i64>> = (0..200)
            .map(|i| {
                let len = if i % 7 == 0 { 5_000 } else { i as usize % 13 };
                (0..len as i64).rev().map(|v| v * (i + 1)).collect()
            })
            .collect();

        let sorted = sort_concurrent(&input).await.unwrap();

        assert_eq!(sorted.len(), input.len());
        for (original, result) in input.iter().zip(&sorted) {
            assert_eq!(original.len(), result.len());
            assert!(is_sorted(result));
        }
        assert_eq!(sorted, sort_sequential(&input));
    }

    #[tokio::test]
    async fn test_timed_reports_result() {
        let response = timed(Strategy::Concurrent, &sample()).await.unwrap();
        assert_eq!(response.sorted_arrays, sort_sequential(&sample()));

        let empty = timed(Strategy::Sequential, &[]).await.unwrap();
        assert!(empty.sorted_arrays.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_strategy_yields_to_runtime() {
        // On a single-threaded runtime another task only runs if the sort
        // awaits instead of occupying the worker.
        let input: Vec<Vec<i64>> = (0..4)
            .map(|i| (0..200_000).map(|v| (v * 2_654_435_761 + i) % 1_000_003).collect())
            .collect();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        let sorted = Strategy::Sequential.run(&input).await.unwrap();

        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(sorted, sort_sequential(&input));
    }

    #[tokio::test]
    async fn test_sequential_strategy_empty() {
        assert!(Strategy::Sequential.run(&[]).await.unwrap().is_empty());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Sequential.to_string(), "sequential");
        assert_eq!(Strategy::Concurrent.to_string(), "concurrent");
    }
}
