use crate::core::amount::narrow;
use crate::core::balance::BalanceEdge;
use crate::core::error::SimplifyError;
use crate::core::member::MemberId;
use crate::graph::balance_matrix::BalanceMatrix;
use crate::graph::partition::CurrencySubgraph;
use crate::optimization::matching::Transfer;
use std::collections::{HashMap, HashSet};

/// Turn matched transfers into symmetric balance rows.
///
/// Each transfer becomes a positive row `creditor -> debtor` followed by its
/// negative mirror. Group id and currency are copied from the input row for
/// the same ordered pair, or from the subgraph's first row when the two
/// members had no row of their own.
pub fn mirror_transfers(
    matrix: &BalanceMatrix,
    subgraph: &CurrencySubgraph,
    transfers: &[Transfer],
) -> Result<Vec<BalanceEdge>, SimplifyError> {
    let Some(fallback) = subgraph.edges.first() else {
        return Ok(Vec::new());
    };
    let originals: HashMap<(MemberId, MemberId), &BalanceEdge> =
        subgraph.edges.iter().map(|e| (e.pair(), e)).collect();

    let mut rows = Vec::with_capacity(transfers.len() * 2);
    for transfer in transfers.iter().filter(|t| t.amount > 0) {
        let paid_by = matrix.member(transfer.creditor);
        let borrowed_by = matrix.member(transfer.debtor);
        let template = originals
            .get(&(paid_by, borrowed_by))
            .copied()
            .unwrap_or(fallback);

        let row = BalanceEdge {
            paid_by,
            borrowed_by,
            amount: narrow(transfer.amount)?,
            ..template.zeroed()
        };
        let mirror = row.mirror();
        rows.push(row);
        rows.push(mirror);
    }
    Ok(rows)
}

/// Append a zero row for every input pair the simplified rows don't cover,
/// so the output has at least the key shape of the input.
pub fn pad_missing_pairs(rows: &mut Vec<BalanceEdge>, subgraph: &CurrencySubgraph) {
    let mut present: HashSet<(MemberId, MemberId)> = rows.iter().map(BalanceEdge::pair).collect();
    for original in &subgraph.edges {
        if present.insert(original.pair()) {
            rows.push(original.zeroed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::member::GroupId;
    use crate::graph::complete::with_mirrors;

    fn edge(group: &str, paid_by: i64, borrowed_by: i64, amount: i64) -> BalanceEdge {
        BalanceEdge::new(
            GroupId::new(group),
            CurrencyCode::new("USD"),
            MemberId::new(paid_by),
            MemberId::new(borrowed_by),
            amount,
        )
    }

    fn members(ids: &[i64]) -> Vec<MemberId> {
        ids.iter().copied().map(MemberId::new).collect()
    }

    #[test]
    fn test_mirror_emits_positive_then_negative() {
        let subgraph = CurrencySubgraph {
            currency: CurrencyCode::new("USD"),
            edges: with_mirrors(&[edge("g", 0, 1, 700)]).unwrap(),
        };
        let matrix = BalanceMatrix::build(&members(&[0, 1]), &subgraph).unwrap();
        let transfers = [Transfer {
            debtor: 1,
            creditor: 0,
            amount: 700,
        }];

        let rows = mirror_transfers(&matrix, &subgraph, &transfers).unwrap();
        assert_eq!(rows, vec![edge("g", 0, 1, 700), edge("g", 1, 0, -700)]);
    }

    #[test]
    fn test_mirror_uses_fallback_for_new_pair() {
        let subgraph = CurrencySubgraph {
            currency: CurrencyCode::new("USD"),
            edges: with_mirrors(&[edge("trip", 0, 1, 100), edge("trip", 1, 2, 100)]).unwrap(),
        };
        let matrix = BalanceMatrix::build(&members(&[0, 1, 2]), &subgraph).unwrap();
        let transfers = [Transfer {
            debtor: 2,
            creditor: 0,
            amount: 100,
        }];

        let rows = mirror_transfers(&matrix, &subgraph, &transfers).unwrap();
        assert_eq!(rows[0], edge("trip", 0, 2, 100));
        assert_eq!(rows[1], edge("trip", 2, 0, -100));
    }

    #[test]
    fn test_mirror_overflow_fails() {
        let subgraph = CurrencySubgraph {
            currency: CurrencyCode::new("USD"),
            edges: with_mirrors(&[edge("g", 0, 1, 1)]).unwrap(),
        };
        let matrix = BalanceMatrix::build(&members(&[0, 1]), &subgraph).unwrap();
        let huge = i64::MAX as i128 * 2;
        let transfers = [Transfer {
            debtor: 1,
            creditor: 0,
            amount: huge,
        }];

        assert_eq!(
            mirror_transfers(&matrix, &subgraph, &transfers),
            Err(SimplifyError::AmountOverflow(huge))
        );
    }

    #[test]
    fn test_pad_restores_input_shape() {
        let subgraph = CurrencySubgraph {
            currency: CurrencyCode::new("USD"),
            edges: with_mirrors(&[
                edge("g", 0, 1, 5),
                edge("g", 1, 2, 5),
                edge("g", 2, 0, 5),
            ])
            .unwrap(),
        };
        let mut rows = Vec::new();
        pad_missing_pairs(&mut rows, &subgraph);

        assert_eq!(rows.len(), subgraph.edges.len());
        assert!(rows.iter().all(|e| e.amount == 0));
    }

    #[test]
    fn test_pad_skips_covered_pairs() {
        let subgraph = CurrencySubgraph {
            currency: CurrencyCode::new("USD"),
            edges: with_mirrors(&[edge("g", 0, 1, 5), edge("g", 1, 2, 5)]).unwrap(),
        };
        let mut rows = vec![edge("g", 0, 1, 3), edge("g", 1, 0, -3)];
        pad_missing_pairs(&mut rows, &subgraph);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2], edge("g", 1, 2, 0));
        assert_eq!(rows[3], edge("g", 2, 1, 0));
    }
}
