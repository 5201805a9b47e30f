use crate::core::error::SimplifyError;
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A member still waiting to be settled during matching.
///
/// `value > 0` is an outstanding credit, `value < 0` an outstanding debt.
/// Entries order by magnitude so one max-heap type serves both sides; equal
/// magnitudes pop the lower member index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: usize,
    pub value: i128,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .unsigned_abs()
            .cmp(&other.value.unsigned_abs())
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single payment: member index `debtor` pays `creditor` a positive `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub debtor: usize,
    pub creditor: usize,
    pub amount: i128,
}

/// Settle a vector of net imbalances with the fewest payments the greedy
/// min-cash-flow strategy finds.
///
/// # Algorithm
///
/// 1. Members with a positive imbalance go on the creditor heap, members
///    with a negative one on the debtor heap. Zeros are dropped.
/// 2. Pop the largest creditor and the largest debtor. The debtor pays the
///    smaller of the two magnitudes to the creditor.
/// 3. Whichever side is left with a remainder goes back on its heap.
/// 4. Stop when either heap is empty; since imbalances sum to zero both
///    empty together.
///
/// Each step settles at least one member completely, so at most
/// `nonzero members - 1` transfers are produced.
pub fn match_transfers(imbalances: &[i128]) -> Result<Vec<Transfer>, SimplifyError> {
    let total: i128 = imbalances.iter().sum();
    if total != 0 {
        return Err(SimplifyError::ImbalancedTotal(total));
    }

    let mut creditors = BinaryHeap::new();
    let mut debtors = BinaryHeap::new();
    for (key, &value) in imbalances.iter().enumerate() {
        match value.cmp(&0) {
            Ordering::Greater => creditors.push(Entry { key, value }),
            Ordering::Less => debtors.push(Entry { key, value }),
            Ordering::Equal => {}
        }
    }

    let mut transfers = Vec::with_capacity(creditors.len().max(debtors.len()));
    while let (Some(creditor), Some(debtor)) = (creditors.peek().copied(), debtors.peek().copied())
    {
        creditors.pop();
        debtors.pop();

        let residual = creditor.value + debtor.value;
        let amount = match residual.cmp(&0) {
            Ordering::Equal => creditor.value,
            Ordering::Less => {
                debtors.push(Entry {
                    key: debtor.key,
                    value: residual,
                });
                creditor.value
            }
            Ordering::Greater => {
                creditors.push(Entry {
                    key: creditor.key,
                    value: residual,
                });
                -debtor.value
            }
        };

        trace!(
            "member #{} pays member #{} {} (residual {})",
            debtor.key,
            creditor.key,
            amount,
            residual
        );
        transfers.push(Transfer {
            debtor: debtor.key,
            creditor: creditor.key,
            amount,
        });
    }

    debug_assert!(creditors.is_empty() && debtors.is_empty());
    Ok(transfers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(imbalances: &[i128], transfers: &[Transfer]) -> Vec<i128> {
        let mut remaining = imbalances.to_vec();
        for t in transfers {
            remaining[t.debtor] += t.amount;
            remaining[t.creditor] -= t.amount;
        }
        remaining
    }

    #[test]
    fn test_entry_orders_by_magnitude_then_key() {
        let mut heap = BinaryHeap::new();
        heap.push(Entry { key: 0, value: -50 });
        heap.push(Entry { key: 1, value: -200 });
        heap.push(Entry { key: 2, value: -200 });
        assert_eq!(heap.pop(), Some(Entry { key: 1, value: -200 }));
        assert_eq!(heap.pop(), Some(Entry { key: 2, value: -200 }));
        assert_eq!(heap.pop(), Some(Entry { key: 0, value: -50 }));
    }

    #[test]
    fn test_three_member_cycle() {
        let transfers = match_transfers(&[-1000, 4000, -3000]).unwrap();
        assert_eq!(
            transfers,
            vec![
                Transfer {
                    debtor: 2,
                    creditor: 1,
                    amount: 3000
                },
                Transfer {
                    debtor: 0,
                    creditor: 1,
                    amount: 1000
                },
            ]
        );
    }

    #[test]
    fn test_creditor_remainder_is_reinserted() {
        // 0 is owed 500 by two debtors; 1 owes 300, 2 owes 200.
        let imbalances = [500, -300, -200];
        let transfers = match_transfers(&imbalances).unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].amount, 300);
        assert_eq!(transfers[1].amount, 200);
        assert!(apply(&imbalances, &transfers).iter().all(|v| *v == 0));
    }

    #[test]
    fn test_all_zero_produces_nothing() {
        assert!(match_transfers(&[0, 0, 0]).unwrap().is_empty());
        assert!(match_transfers(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_imbalanced_total_fails() {
        assert_eq!(
            match_transfers(&[100, -90]),
            Err(SimplifyError::ImbalancedTotal(10))
        );
    }

    #[test]
    fn test_ties_still_settle_everyone() {
        let imbalances = [100, 100, -100, -100, 0];
        let transfers = match_transfers(&imbalances).unwrap();
        assert_eq!(transfers.len(), 2);
        assert!(transfers.iter().all(|t| t.amount > 0));
        assert!(apply(&imbalances, &transfers).iter().all(|v| *v == 0));
    }

    #[test]
    fn test_count_bounded_by_nonzero_members() {
        let imbalances = [470, 320, 240, -1120, 565, -475];
        let transfers = match_transfers(&imbalances).unwrap();
        assert_eq!(transfers.len(), 5);
        assert!(apply(&imbalances, &transfers).iter().all(|v| *v == 0));
    }
}
