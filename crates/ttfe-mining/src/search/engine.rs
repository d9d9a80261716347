//! Recursive prefix-tree enumeration with live-threshold pruning.

use std::fmt;

use serde::Serialize;
use ttfe_core::config::StrategyFlags;
use ttfe_core::errors::MiningError;
use ttfe_core::events::types::{PatternSavedEvent, ThresholdRaisedEvent};
use ttfe_core::events::EventDispatcher;
use ttfe_core::types::collections::SmallVec4;
use ttfe_core::{Cancellable, ItemId};

use super::join::{join, JoinOutcome};
use super::list::MembershipList;
use crate::results::{Pattern, ResultQueue};
use crate::table::CooccurrenceTable;
use crate::threshold::{RaiseStrategy, Threshold};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Candidate nodes created: root lists plus successful joins.
    pub nodes: u64,
    /// Joins attempted.
    pub joins: u64,
    /// Joins stopped early by the running bound.
    pub aborted_joins: u64,
    /// Joins skipped by the co-occurrence bound.
    pub cooccurrence_skips: u64,
    /// Nodes whose extension bound fell below the threshold.
    pub pruned_nodes: u64,
    /// Patterns offered to the result queue.
    pub saved: u64,
    /// Threshold increases fed back from the result queue.
    pub queue_raises: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} joins={} aborted={} cooccurrence_skips={} pruned={} saved={} queue_raises={}",
            self.nodes,
            self.joins,
            self.aborted_joins,
            self.cooccurrence_skips,
            self.pruned_nodes,
            self.saved,
            self.queue_raises
        )
    }
}

/// What the search hands back to the pipeline.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Top-K patterns, best first.
    pub patterns: Vec<Pattern>,
    pub threshold: Threshold,
    pub stats: SearchStats,
}

/// Depth-first enumerator. Owns the threshold and the result queue for the
/// duration of the search; nothing else mutates them.
pub struct SearchEngine<'a, C: Cancellable> {
    threshold: Threshold,
    queue: ResultQueue,
    flags: StrategyFlags,
    cooccurrence: Option<&'a CooccurrenceTable>,
    cancel: &'a C,
    dispatcher: &'a EventDispatcher,
    stats: SearchStats,
}

impl<'a, C: Cancellable> SearchEngine<'a, C> {
    pub fn new(
        top_k: usize,
        threshold: Threshold,
        flags: StrategyFlags,
        cancel: &'a C,
        dispatcher: &'a EventDispatcher,
    ) -> Self {
        Self {
            threshold,
            queue: ResultQueue::new(top_k),
            flags,
            cooccurrence: None,
            cancel,
            dispatcher,
            stats: SearchStats::default(),
        }
    }

    /// Consult `table` before every join.
    pub fn with_cooccurrence(mut self, table: &'a CooccurrenceTable) -> Self {
        self.cooccurrence = Some(table);
        self
    }

    /// Enumerate every pattern reachable from `roots` (one list per
    /// surviving item, in global order).
    pub fn run(mut self, roots: Vec<MembershipList>) -> Result<SearchOutcome, MiningError> {
        self.stats.nodes += roots.len() as u64;
        let mut prefix: SmallVec4<ItemId> = SmallVec4::new();
        self.explore(&mut prefix, None, &roots)?;
        Ok(SearchOutcome {
            patterns: self.queue.into_sorted(),
            threshold: self.threshold,
            stats: self.stats,
        })
    }

    /// Visit one level: save every admitted node, then expand the nodes
    /// whose bound reaches the threshold, last node first.
    ///
    /// `parent` is the list of `prefix`; `level` holds the lists of
    /// `prefix + item` for each sibling item.
    fn explore(
        &mut self,
        prefix: &mut SmallVec4<ItemId>,
        parent: Option<&MembershipList>,
        level: &[MembershipList],
    ) -> Result<(), MiningError> {
        for node in level.iter().rev() {
            if self.threshold.admits(node.value_sum) {
                self.save(prefix, node);
            }
        }

        for i in (0..level.len()).rev() {
            self.cancel.checkpoint()?;
            let x = &level[i];
            if self.flags.prune_search && self.threshold.prunes(x.upper_bound()) {
                self.stats.pruned_nodes += 1;
                continue;
            }

            let mut children = Vec::new();
            for y in &level[i + 1..] {
                if self.skip_by_cooccurrence(x, y) {
                    self.stats.cooccurrence_skips += 1;
                    continue;
                }
                self.stats.joins += 1;
                match join(parent, x, y, &self.threshold, self.flags.prune_search) {
                    JoinOutcome::Joined(child) => children.push(child),
                    JoinOutcome::Aborted => self.stats.aborted_joins += 1,
                    JoinOutcome::Empty => {}
                }
            }
            if children.is_empty() {
                continue;
            }
            self.stats.nodes += children.len() as u64;

            prefix.push(x.item);
            tracing::trace!(depth = prefix.len(), children = children.len(), "expanding node");
            let result = self.explore(prefix, Some(x), &children);
            prefix.pop();
            result?;
        }
        Ok(())
    }

    fn skip_by_cooccurrence(&self, x: &MembershipList, y: &MembershipList) -> bool {
        if !(self.flags.prune_search && self.flags.cooccurrence_pruning) {
            return false;
        }
        match self.cooccurrence {
            Some(table) => self.threshold.prunes(table.bound(x.rank, y.rank)),
            None => false,
        }
    }

    fn save(&mut self, prefix: &[ItemId], node: &MembershipList) {
        let pattern = Pattern::new(
            prefix.iter().copied().chain(std::iter::once(node.item)),
            node.value_sum,
        );
        self.stats.saved += 1;
        if self.dispatcher.is_active() {
            self.dispatcher.emit_pattern_saved(&PatternSavedEvent {
                items: pattern.items.to_vec(),
                value: pattern.value,
            });
        }
        if !self.queue.offer(pattern) || !self.flags.queue_feedback {
            return;
        }
        if let Some(min) = self.queue.threshold() {
            let previous = self.threshold.value();
            if self.threshold.raise(min) {
                self.stats.queue_raises += 1;
                self.dispatcher.emit_threshold_raised(&ThresholdRaisedEvent {
                    source: RaiseStrategy::ResultQueue.name(),
                    previous,
                    current: min,
                });
            }
        }
    }
}
