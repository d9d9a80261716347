//! Merge-join of two sibling membership lists.

use super::list::{MembershipEntry, MembershipList};
use crate::threshold::Threshold;

/// Result of joining `x` with a later sibling `y`.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// The child `prefix + x + y` and its membership.
    Joined(MembershipList),
    /// No transaction holds both.
    Empty,
    /// The running bound fell below the threshold part-way through.
    Aborted,
}

/// Build the membership of `prefix ∪ {x.item, y.item}` from the lists of
/// `prefix ∪ {x.item}` and `prefix ∪ {y.item}`.
///
/// `parent` is the list of `prefix` itself (`None` at the root), whose
/// per-transaction value was counted in both inputs and is subtracted once.
/// With `prune` set, the join stops as soon as the transactions holding `x`
/// but not `y` have eaten enough of `x`'s bound to fall under `threshold`.
pub fn join(
    parent: Option<&MembershipList>,
    x: &MembershipList,
    y: &MembershipList,
    threshold: &Threshold,
    prune: bool,
) -> JoinOutcome {
    let mut bound = x.upper_bound();
    let mut child = MembershipList::new(y.item, y.rank);
    let mut parent_pos = 0;
    let mut j = 0;

    for ex in &x.entries {
        while j < y.entries.len() && y.entries[j].tid < ex.tid {
            j += 1;
        }
        match y.entries.get(j) {
            Some(ey) if ey.tid == ex.tid => {
                let shared = match parent {
                    Some(p) => prefix_value(p, &mut parent_pos, ex.tid),
                    None => 0.0,
                };
                child.push(MembershipEntry {
                    tid: ex.tid,
                    value: ex.value + ey.value - shared,
                    remaining: ey.remaining,
                });
                j += 1;
            }
            _ => {
                bound -= ex.value + ex.remaining;
                if prune && threshold.prunes(bound) {
                    return JoinOutcome::Aborted;
                }
            }
        }
    }

    if child.is_empty() {
        JoinOutcome::Empty
    } else {
        JoinOutcome::Joined(child)
    }
}

/// Value of the prefix in transaction `tid`. The parent holds every
/// transaction its children hold, and lookups arrive in ascending `tid`.
fn prefix_value(parent: &MembershipList, pos: &mut usize, tid: u32) -> f64 {
    while *pos < parent.entries.len() && parent.entries[*pos].tid < tid {
        *pos += 1;
    }
    match parent.entries.get(*pos) {
        Some(e) if e.tid == tid => e.value,
        _ => 0.0,
    }
}
