//! Short-circuiting combinators over concurrently evaluated operations.
//!
//! Every operation yields `Result<T, E>`. Errors never escape a combinator:
//! `every` and `some` read an `Err` as "does not satisfy", `filter` drops it.
//!
//! All operations are driven concurrently on the caller's task. When a
//! combinator resolves early the operations still in flight are dropped, so
//! their results are discarded; any remote request they already issued has
//! still been paid for. Nothing here cancels work on the remote side.

use futures::stream::{self, FuturesUnordered, Stream, StreamExt};
use std::{future::Future, num::NonZeroUsize, pin::pin};

/// `true` iff every operation succeeds and satisfies `predicate`.
///
/// Resolves `false` on the first failing or erroring operation without
/// waiting for the rest. An empty input is vacuously `true`.
pub async fn every<I, F, T, E, P>(ops: I, mut predicate: P) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let mut pending: FuturesUnordered<F> = ops.into_iter().collect();

    while let Some(result) = pending.next().await {
        match result {
            Ok(value) if predicate(&value) => {}
            _ => return false,
        }
    }

    true
}

/// `true` as soon as one operation succeeds and satisfies `predicate`.
///
/// Resolves `false` only once every operation has settled without a match.
/// An empty input is `false`.
pub async fn some<I, F, T, E, P>(ops: I, mut predicate: P) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let mut pending: FuturesUnordered<F> = ops.into_iter().collect();

    while let Some(result) = pending.next().await {
        if let Ok(value) = result
            && predicate(&value)
        {
            return true;
        }
    }

    false
}

/// Collect successful results satisfying `predicate`, in arrival order.
///
/// Resolves once `limit` matches are held or every operation has settled,
/// whichever comes first, and never returns more than `limit` values.
/// `None` waits for everything.
pub async fn filter<I, F, T, E, P>(ops: I, predicate: P, limit: Option<usize>) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let pending: FuturesUnordered<F> = ops.into_iter().collect();

    collect_matching(pending, predicate, limit).await
}

/// [`filter`] with at most `max_in_flight` operations driven at once.
///
/// Operations are started in input order; a new one starts each time one
/// settles.
pub async fn filter_buffered<I, F, T, E, P>(
    ops: I,
    predicate: P,
    limit: Option<usize>,
    max_in_flight: NonZeroUsize,
) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let pending = stream::iter(ops).buffer_unordered(max_in_flight.get());

    collect_matching(pending, predicate, limit).await
}

async fn collect_matching<S, T, E, P>(settled: S, mut predicate: P, limit: Option<usize>) -> Vec<T>
where
    S: Stream<Item = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let mut matches = Vec::new();
    if limit == Some(0) {
        return matches;
    }

    let mut settled = pin!(settled);
    while let Some(result) = settled.next().await {
        let Ok(value) = result else {
            continue;
        };
        if !predicate(&value) {
            continue;
        }

        matches.push(value);
        if limit.is_some_and(|limit| matches.len() >= limit) {
            break;
        }
    }

    matches
}

///
/// TESTS
///
