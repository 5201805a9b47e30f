//! Helpers that put caller-side balance rows into the shape the simplifier
//! expects: symmetric, and padded to a complete graph.
//!
//! The simplifier itself never calls these. It only restores the pairs it
//! was given, so a caller that wants every member pair present in the
//! output pads the input first.

use crate::core::balance::BalanceEdge;
use crate::core::error::SimplifyError;
use crate::core::member::MemberId;
use crate::graph::partition::partition_by_currency;
use std::collections::HashSet;

/// Expand one-row-per-debt input into symmetric rows: each row is followed
/// by its reverse-signed mirror.
pub fn with_mirrors(debts: &[BalanceEdge]) -> Result<Vec<BalanceEdge>, SimplifyError> {
    let mut rows = Vec::with_capacity(debts.len() * 2);
    for debt in debts {
        rows.push(debt.clone());
        rows.push(debt.checked_mirror()?);
    }
    Ok(rows)
}

/// Add a zero row for every ordered pair of distinct members missing from
/// each currency. `members` is extended with every member already present
/// in `edges`.
///
/// Existing rows keep their order; padding rows follow, per currency.
pub fn pad_to_complete(edges: &[BalanceEdge], members: &[MemberId]) -> Vec<BalanceEdge> {
    let partition = partition_by_currency(edges);
    let mut all_members: Vec<MemberId> = members
        .iter()
        .copied()
        .chain(partition.members.iter().copied())
        .collect();
    all_members.sort();
    all_members.dedup();

    let mut padded = edges.to_vec();
    for subgraph in &partition.subgraphs {
        let Some(template) = subgraph.edges.first() else {
            continue;
        };
        let present: HashSet<(MemberId, MemberId)> =
            subgraph.edges.iter().map(BalanceEdge::pair).collect();

        for &paid_by in &all_members {
            for &borrowed_by in &all_members {
                if paid_by == borrowed_by || present.contains(&(paid_by, borrowed_by)) {
                    continue;
                }
                padded.push(BalanceEdge {
                    paid_by,
                    borrowed_by,
                    ..template.zeroed()
                });
            }
        }
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::member::GroupId;

    fn edge(currency: &str, paid_by: i64, borrowed_by: i64, amount: i64) -> BalanceEdge {
        BalanceEdge::new(
            GroupId::new("g"),
            CurrencyCode::new(currency),
            MemberId::new(paid_by),
            MemberId::new(borrowed_by),
            amount,
        )
    }

    #[test]
    fn test_with_mirrors() {
        let rows = with_mirrors(&[edge("USD", 1, 2, 40)]).unwrap();
        assert_eq!(rows, vec![edge("USD", 1, 2, 40), edge("USD", 2, 1, -40)]);
    }

    #[test]
    fn test_with_mirrors_rejects_unmirrorable_amount() {
        let err = with_mirrors(&[edge("USD", 1, 2, 40), edge("USD", 2, 3, i64::MIN)]).unwrap_err();
        assert!(matches!(err, SimplifyError::AmountOverflow(_)));
    }

    #[test]
    fn test_pad_three_members() {
        let rows = with_mirrors(&[edge("USD", 1, 2, 40)]).unwrap();
        let padded = pad_to_complete(&rows, &[MemberId::new(3)]);

        // 3 members -> 6 ordered pairs
        assert_eq!(padded.len(), 6);
        assert_eq!(&padded[..2], &rows[..]);
        assert!(padded[2..].iter().all(|e| e.amount == 0));
        let pairs: HashSet<_> = padded.iter().map(BalanceEdge::pair).collect();
        assert_eq!(pairs.len(), 6);
    }

    #[test]
    fn test_pad_per_currency() {
        let rows = vec![
            edge("USD", 1, 2, 40),
            edge("USD", 2, 1, -40),
            edge("EUR", 2, 3, 5),
            edge("EUR", 3, 2, -5),
        ];
        let padded = pad_to_complete(&rows, &[]);

        for currency in ["USD", "EUR"] {
            let count = padded
                .iter()
                .filter(|e| e.currency == CurrencyCode::new(currency))
                .count();
            assert_eq!(count, 6, "{currency} should cover every ordered pair");
        }
    }

    #[test]
    fn test_pad_empty() {
        assert!(pad_to_complete(&[], &[MemberId::new(1), MemberId::new(2)]).is_empty());
    }
}
