use crate::core::balance::BalanceEdge;
use crate::core::currency::CurrencyCode;
use crate::core::member::MemberId;
use std::collections::HashMap;

/// Net position of each member in each currency, read off a balance list.
///
/// A member's position is the sum of `amount` over every row where it is
/// `paid_by`. On a symmetric balance graph this equals what the member is
/// owed minus what it owes, so two balance lists settle the same debts
/// exactly when their positions agree.
///
/// Positive = net creditor, negative = net debtor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetPositions {
    positions: HashMap<(MemberId, CurrencyCode), i128>,
}

impl NetPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build positions from every row of a balance list.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a BalanceEdge>) -> Self {
        let mut positions = Self::new();
        for edge in edges {
            positions.apply(edge);
        }
        positions
    }

    /// Credit the row's amount to its `paid_by` member.
    pub fn apply(&mut self, edge: &BalanceEdge) {
        *self
            .positions
            .entry((edge.paid_by, edge.currency.clone()))
            .or_insert(0) += edge.amount as i128;
    }

    pub fn position(&self, member: MemberId, currency: &CurrencyCode) -> i128 {
        self.positions
            .get(&(member, currency.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn all_positions(&self) -> &HashMap<(MemberId, CurrencyCode), i128> {
        &self.positions
    }

    /// True when positions sum to zero in every currency.
    pub fn is_balanced(&self) -> bool {
        let mut currency_sums: HashMap<&CurrencyCode, i128> = HashMap::new();
        for ((_, currency), amount) in &self.positions {
            *currency_sums.entry(currency).or_insert(0) += amount;
        }
        currency_sums.values().all(|sum| *sum == 0)
    }

    /// True when both lists leave every member in the same net position.
    /// Members missing on one side count as zero.
    pub fn agrees_with(&self, other: &NetPositions) -> bool {
        self.positions
            .keys()
            .chain(other.positions.keys())
            .all(|(m, c)| self.position(*m, c) == other.position(*m, c))
    }
}
