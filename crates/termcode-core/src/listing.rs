//! Ordering of the problem listing.

use crate::model::{Completion, Difficulty, Problem};

/// Group a problem falls into on the listing screen.
///
/// Buckets are shown in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListingBucket {
    Easy,
    Medium,
    Hard,
    Completed,
}

impl ListingBucket {
    pub fn of(problem: &Problem) -> Self {
        match (problem.completion, problem.difficulty) {
            (Completion::Done, _) => ListingBucket::Completed,
            (_, Difficulty::Easy) => ListingBucket::Easy,
            (_, Difficulty::Medium) => ListingBucket::Medium,
            (_, Difficulty::Hard) => ListingBucket::Hard,
        }
    }
}

/// Problems in display order.
///
/// Within a bucket the incoming order is kept; the store already sorts by id.
pub fn listing_order(problems: &[Problem]) -> Vec<&Problem> {
    let mut ordered: Vec<&Problem> = problems.iter().collect();
    // stable: ties keep load order
    ordered.sort_by_key(|p| ListingBucket::of(p));
    ordered
}
