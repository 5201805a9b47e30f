use crate::core::amount::{narrow, to_major_units, Amount};
use crate::core::error::SimplifyError;
use crate::core::currency::CurrencyCode;
use crate::core::member::{GroupId, MemberId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed pairwise balance between two members of a group.
///
/// A positive `amount` means `borrowed_by` owes `paid_by` that many minor
/// units. A negative amount is the mirror of the opposite row, and zero is a
/// placeholder keeping the pair present in the graph.
///
/// The field names serialize in camelCase so rows coming straight out of a
/// balance aggregation query deserialize without renaming.
///
/// # Examples
///
/// ```
/// use settlement_engine::core::balance::BalanceEdge;
/// use settlement_engine::core::currency::CurrencyCode;
/// use settlement_engine::core::member::{GroupId, MemberId};
///
/// let edge = BalanceEdge::new(
///     GroupId::new("trip"),
///     CurrencyCode::new("USD"),
///     MemberId::new(1),
///     MemberId::new(2),
///     2_500,
/// );
///
/// let mirror = edge.mirror();
/// assert_eq!(mirror.paid_by, MemberId::new(2));
/// assert_eq!(mirror.amount, -2_500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEdge {
    pub group_id: GroupId,
    pub currency: CurrencyCode,
    /// The member who is owed when `amount > 0`.
    pub paid_by: MemberId,
    /// The member who owes when `amount > 0`.
    pub borrowed_by: MemberId,
    /// Signed amount in the currency's minor unit.
    pub amount: Amount,
}

impl BalanceEdge {
    pub fn new(
        group_id: GroupId,
        currency: CurrencyCode,
        paid_by: MemberId,
        borrowed_by: MemberId,
        amount: Amount,
    ) -> Self {
        Self {
            group_id,
            currency,
            paid_by,
            borrowed_by,
            amount,
        }
    }

    /// The same debt seen from the other member: endpoints swapped, amount negated.
    ///
    /// `amount` must not be `i64::MIN`; use [`checked_mirror`](Self::checked_mirror)
    /// for rows that have not been validated.
    pub fn mirror(&self) -> Self {
        Self {
            group_id: self.group_id.clone(),
            currency: self.currency.clone(),
            paid_by: self.borrowed_by,
            borrowed_by: self.paid_by,
            amount: -self.amount,
        }
    }

    /// Like [`mirror`](Self::mirror), but an amount with no positive
    /// counterpart fails with [`SimplifyError::AmountOverflow`].
    pub fn checked_mirror(&self) -> Result<Self, SimplifyError> {
        let amount = narrow(-(self.amount as i128))?;
        Ok(Self {
            group_id: self.group_id.clone(),
            currency: self.currency.clone(),
            paid_by: self.borrowed_by,
            borrowed_by: self.paid_by,
            amount,
        })
    }

    /// A copy of this row with the amount cleared.
    pub fn zeroed(&self) -> Self {
        Self {
            amount: 0,
            ..self.clone()
        }
    }

    /// The ordered `(paid_by, borrowed_by)` key of this row.
    pub fn pair(&self) -> (MemberId, MemberId) {
        (self.paid_by, self.borrowed_by)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for BalanceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {} {}",
            self.paid_by, self.borrowed_by, self.amount, self.currency
        )
    }
}

/// A suggested payment extracted from a simplified balance list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Amount,
    pub currency: CurrencyCode,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = to_major_units(self.amount, self.currency.decimal_digits());
        write!(f, "{} pays {} {} {}", self.from, self.to, major, self.currency)
    }
}

/// An ordered collection of balance rows for one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSet {
    edges: Vec<BalanceEdge>,
}

impl BalanceSet {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub fn add(&mut self, edge: BalanceEdge) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[BalanceEdge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<BalanceEdge> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All members referenced by any row, in any currency, sorted.
    pub fn members(&self) -> Vec<MemberId> {
        let mut members: Vec<MemberId> = self
            .edges
            .iter()
            .flat_map(|e| [e.paid_by, e.borrowed_by])
            .collect();
        members.sort();
        members.dedup();
        members
    }

    /// All currencies referenced by any row, sorted.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut currencies: Vec<CurrencyCode> =
            self.edges.iter().map(|e| e.currency.clone()).collect();
        currencies.sort();
        currencies.dedup();
        currencies
    }

    /// Number of rows carrying a real (strictly positive) debt.
    pub fn positive_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_positive()).count()
    }

    /// The "debtor pays creditor" view of the positive rows, for display.
    /// Zero placeholders and negative mirrors are dropped.
    pub fn settlements(&self) -> Vec<Settlement> {
        self.edges
            .iter()
            .filter(|e| e.is_positive())
            .map(|e| Settlement {
                from: e.borrowed_by,
                to: e.paid_by,
                amount: e.amount,
                currency: e.currency.clone(),
            })
            .collect()
    }
}

impl FromIterator<BalanceEdge> for BalanceSet {
    fn from_iter<T: IntoIterator<Item = BalanceEdge>>(iter: T) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<BalanceEdge>> for BalanceSet {
    fn from(edges: Vec<BalanceEdge>) -> Self {
        Self { edges }
    }
}
