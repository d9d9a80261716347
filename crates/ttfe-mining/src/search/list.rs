//! Transaction-membership lists.

use ttfe_core::ItemId;

use crate::corpus::PrunedCorpus;

/// A pattern's footprint in one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipEntry {
    pub tid: u32,
    /// Value of the pattern's items in this transaction.
    pub value: f64,
    /// Value of the transaction's items ranked after the pattern's last item.
    pub remaining: f64,
}

/// Membership of one candidate pattern: the pattern's last item plus one
/// entry per supporting transaction, in transaction-id order.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipList {
    pub item: ItemId,
    pub rank: usize,
    pub entries: Vec<MembershipEntry>,
    pub value_sum: f64,
    pub remaining_sum: f64,
}

impl MembershipList {
    pub fn new(item: ItemId, rank: usize) -> Self {
        Self {
            item,
            rank,
            entries: Vec::new(),
            value_sum: 0.0,
            remaining_sum: 0.0,
        }
    }

    pub fn push(&mut self, entry: MembershipEntry) {
        self.value_sum += entry.value;
        self.remaining_sum += entry.remaining;
        self.entries.push(entry);
    }

    /// Exact value plus everything any extension could still add.
    pub fn upper_bound(&self) -> f64 {
        self.value_sum + self.remaining_sum
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One list per surviving item, in rank order.
pub fn build_root_lists(corpus: &PrunedCorpus) -> Vec<MembershipList> {
    let mut lists: Vec<MembershipList> = corpus
        .items()
        .iter()
        .enumerate()
        .map(|(rank, &item)| MembershipList::new(item, rank))
        .collect();

    for tx in corpus.transactions() {
        let mut remaining = 0.0;
        for entry in tx.entries.iter().rev() {
            lists[entry.rank].push(MembershipEntry {
                tid: tx.tid.inner(),
                value: entry.value,
                remaining,
            });
            remaining += entry.value;
        }
    }

    lists.retain(|l| !l.is_empty());
    lists
}
