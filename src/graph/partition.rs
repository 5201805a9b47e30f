use crate::core::balance::BalanceEdge;
use crate::core::currency::CurrencyCode;
use crate::core::member::MemberId;
use std::collections::BTreeMap;

/// All balance rows of a single currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySubgraph {
    pub currency: CurrencyCode,
    pub edges: Vec<BalanceEdge>,
}

impl CurrencySubgraph {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// A group's balances split by currency over one shared member list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Every member seen in any currency, sorted by id.
    pub members: Vec<MemberId>,
    /// One subgraph per currency, sorted by currency code.
    pub subgraphs: Vec<CurrencySubgraph>,
}

/// Split a mixed-currency balance list into per-currency subgraphs.
///
/// The member list is taken from the whole input, so a member that only
/// shows up in EUR still indexes into the USD matrix. Row order inside each
/// subgraph follows the input.
pub fn partition_by_currency(edges: &[BalanceEdge]) -> Partition {
    let mut by_currency: BTreeMap<CurrencyCode, Vec<BalanceEdge>> = BTreeMap::new();
    for edge in edges {
        by_currency
            .entry(edge.currency.clone())
            .or_default()
            .push(edge.clone());
    }

    let mut members: Vec<MemberId> = edges
        .iter()
        .flat_map(|e| [e.paid_by, e.borrowed_by])
        .collect();
    members.sort();
    members.dedup();

    let subgraphs = by_currency
        .into_iter()
        .map(|(currency, edges)| CurrencySubgraph { currency, edges })
        .collect();

    Partition { members, subgraphs }
}
