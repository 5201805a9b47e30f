use crate::core::currency::CurrencyCode;
use crate::core::error::SimplifyError;
use crate::core::member::MemberId;
use crate::graph::partition::CurrencySubgraph;
use std::collections::HashMap;

/// Square matrix of who owes whom in one currency.
///
/// `owed(i, j)` is what member `i` owes member `j`. Only strictly positive
/// rows feed the matrix: a negative row is the mirror of a positive one and
/// counting it too would double every debt.
///
/// Indices follow the member list handed to [`BalanceMatrix::build`].
#[derive(Debug, Clone)]
pub struct BalanceMatrix {
    currency: CurrencyCode,
    members: Vec<MemberId>,
    index: HashMap<MemberId, usize>,
    cells: Vec<i128>,
}

impl BalanceMatrix {
    /// Build the matrix for one currency over the group's member list.
    pub fn build(
        members: &[MemberId],
        subgraph: &CurrencySubgraph,
    ) -> Result<Self, SimplifyError> {
        let index: HashMap<MemberId, usize> =
            members.iter().enumerate().map(|(i, &m)| (m, i)).collect();
        let n = members.len();
        let mut matrix = Self {
            currency: subgraph.currency.clone(),
            members: members.to_vec(),
            index,
            cells: vec![0; n * n],
        };

        for edge in &subgraph.edges {
            let creditor = matrix.lookup(edge.paid_by)?;
            let debtor = matrix.lookup(edge.borrowed_by)?;
            if edge.amount > 0 {
                matrix.cells[debtor * n + creditor] += edge.amount as i128;
            }
        }

        Ok(matrix)
    }

    fn lookup(&self, member: MemberId) -> Result<usize, SimplifyError> {
        self.index
            .get(&member)
            .copied()
            .ok_or_else(|| SimplifyError::UnknownMember {
                member,
                currency: self.currency.clone(),
            })
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn member(&self, index: usize) -> MemberId {
        self.members[index]
    }

    pub fn index_of(&self, member: MemberId) -> Option<usize> {
        self.index.get(&member).copied()
    }

    /// Amount member `debtor` owes member `creditor`.
    pub fn owed(&self, debtor: usize, creditor: usize) -> i128 {
        self.cells[debtor * self.size() + creditor]
    }

    /// Net imbalance per member index: what it is owed minus what it owes.
    ///
    /// Every debt is added once and subtracted once, so the result always
    /// sums to zero.
    pub fn net_imbalances(&self) -> Vec<i128> {
        let n = self.size();
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| self.owed(j, i) - self.owed(i, j))
                    .sum::<i128>()
            })
            .collect()
    }
}

/// Check that a currency subgraph is symmetric: every row `(a, b, x)` has
/// exactly one partner `(b, a, -x)`, and no ordered pair appears twice.
pub fn verify_symmetric(subgraph: &CurrencySubgraph) -> Result<(), SimplifyError> {
    let mut amounts: HashMap<(MemberId, MemberId), i64> = HashMap::with_capacity(subgraph.len());
    for edge in &subgraph.edges {
        if amounts.insert(edge.pair(), edge.amount).is_some() {
            return Err(SimplifyError::DuplicatePair {
                paid_by: edge.paid_by,
                borrowed_by: edge.borrowed_by,
                currency: subgraph.currency.clone(),
            });
        }
    }

    for edge in &subgraph.edges {
        let mirror = amounts.get(&(edge.borrowed_by, edge.paid_by)).copied();
        if mirror.map(|m| m as i128) != Some(-(edge.amount as i128)) {
            return Err(SimplifyError::AsymmetricBalance {
                paid_by: edge.paid_by,
                borrowed_by: edge.borrowed_by,
                currency: subgraph.currency.clone(),
                amount: edge.amount,
                mirror,
            });
        }
    }
    Ok(())
}
