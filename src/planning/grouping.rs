use super::request::TransactionRequest;
use crate::chain::ChainKey;
use ahash::HashMap;

/// All requests of a run that target one chain, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainGroup {
    pub chain: ChainKey,
    pub requests: Vec<TransactionRequest>,
}

impl ChainGroup {
    fn new(chain: ChainKey) -> Self {
        Self { chain, requests: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Whether any request in the group needs the wallet.
    pub fn has_submittable(&self) -> bool {
        self.requests.iter().any(|request| !request.is_terminal())
    }
}

/// Partition requests by chain. Groups come out in the order their chain first appears,
/// requests keep their relative input order within a group.
pub fn group_by_chain(requests: impl IntoIterator<Item = TransactionRequest>) -> Vec<ChainGroup> {
    let mut groups: Vec<ChainGroup> = Vec::new();
    let mut index: HashMap<ChainKey, usize> = HashMap::default();

    for request in requests {
        let slot = *index.entry(request.chain.clone()).or_insert_with(|| {
            groups.push(ChainGroup::new(request.chain.clone()));
            groups.len() - 1
        });
        groups[slot].requests.push(request);
    }

    groups
}
