use crate::core::amount::to_major_units;
use crate::core::balance::{BalanceEdge, BalanceSet, Settlement};
use crate::core::currency::CurrencyCode;
use crate::core::error::SimplifyError;
use crate::core::ledger::NetPositions;
use crate::core::member::MemberId;
use crate::graph::balance_matrix::{verify_symmetric, BalanceMatrix};
use crate::graph::partition::{partition_by_currency, CurrencySubgraph};
use crate::optimization::matching::match_transfers;
use crate::optimization::padding::{mirror_transfers, pad_missing_pairs};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which input and output checks the simplifier runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifierConfig {
    /// Reject subgraphs whose rows are not exact mirrors of each other.
    pub verify_symmetry: bool,
    /// Re-derive every member's net position from the output and compare it
    /// with the input before returning.
    pub verify_conservation: bool,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            verify_symmetry: true,
            verify_conservation: true,
        }
    }
}

/// Simplification figures for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyReport {
    pub currency: CurrencyCode,
    /// Members with at least one row in this currency.
    pub member_count: usize,
    /// Positive rows in the input.
    pub transactions_before: usize,
    /// Positive rows in the output.
    pub transactions_after: usize,
    /// Sum of positive input amounts.
    pub volume_before: i128,
    /// Sum of positive output amounts.
    pub volume_after: i128,
}

impl CurrencyReport {
    fn new(subgraph: &CurrencySubgraph, rows: &[BalanceEdge]) -> Self {
        let members: HashSet<MemberId> = subgraph
            .edges
            .iter()
            .flat_map(|e| [e.paid_by, e.borrowed_by])
            .collect();
        let positive = |edges: &[BalanceEdge]| -> (usize, i128) {
            edges
                .iter()
                .filter(|e| e.is_positive())
                .fold((0, 0), |(n, v), e| (n + 1, v + e.amount as i128))
        };
        let (transactions_before, volume_before) = positive(subgraph.edges.as_slice());
        let (transactions_after, volume_after) = positive(rows);

        Self {
            currency: subgraph.currency.clone(),
            member_count: members.len(),
            transactions_before,
            transactions_after,
            volume_before,
            volume_after,
        }
    }

    /// Payments saved by simplifying.
    pub fn transactions_saved(&self) -> usize {
        self.transactions_before.saturating_sub(self.transactions_after)
    }
}

/// Per-currency summary of a simplification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplificationReport {
    pub currencies: Vec<CurrencyReport>,
}

impl SimplificationReport {
    pub fn transactions_before(&self) -> usize {
        self.currencies.iter().map(|c| c.transactions_before).sum()
    }

    pub fn transactions_after(&self) -> usize {
        self.currencies.iter().map(|c| c.transactions_after).sum()
    }

    pub fn currency(&self, currency: &CurrencyCode) -> Option<&CurrencyReport> {
        self.currencies.iter().find(|c| &c.currency == currency)
    }
}

impl std::fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Simplification Report ===")?;
        writeln!(f, "Transactions before: {}", self.transactions_before())?;
        writeln!(f, "Transactions after:  {}", self.transactions_after())?;

        for report in &self.currencies {
            let digits = report.currency.decimal_digits();
            writeln!(f, "\n--- {} ---", report.currency)?;
            writeln!(f, "  Members:      {}", report.member_count)?;
            writeln!(
                f,
                "  Transactions: {} -> {}",
                report.transactions_before, report.transactions_after
            )?;
            writeln!(
                f,
                "  Volume:       {} -> {}",
                format_volume(report.volume_before, digits),
                format_volume(report.volume_after, digits)
            )?;
        }
        Ok(())
    }
}

fn format_volume(volume: i128, digits: u32) -> String {
    match i64::try_from(volume) {
        Ok(v) => to_major_units(v, digits).to_string(),
        Err(_) => format!("{volume} (minor units)"),
    }
}

/// Simplified rows for every currency plus the run's report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplificationResult {
    edges: Vec<BalanceEdge>,
    report: SimplificationReport,
}

impl SimplificationResult {
    /// Simplified rows, currencies concatenated in code order. Includes
    /// negative mirrors and zero placeholders.
    pub fn edges(&self) -> &[BalanceEdge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<BalanceEdge> {
        self.edges
    }

    pub fn report(&self) -> &SimplificationReport {
        &self.report
    }

    /// The payments to make, zero and mirror rows removed.
    pub fn settlements(&self) -> Vec<Settlement> {
        BalanceSet::from(self.edges.clone()).settlements()
    }
}

/// The debt simplification engine.
///
/// Stateless apart from its config: every call builds its own matrices and
/// heaps, so one instance can serve any number of groups concurrently.
///
/// # Examples
///
/// ```
/// use settlement_engine::prelude::*;
///
/// let usd = CurrencyCode::new("USD");
/// let group = GroupId::new("trip");
/// let debt = |paid_by: i64, borrowed_by: i64, amount: i64| {
///     BalanceEdge::new(group.clone(), usd.clone(), MemberId::new(paid_by), MemberId::new(borrowed_by), amount)
/// };
///
/// // 2 owes 1, and 3 owes 2, the same amount: 3 can pay 1 directly.
/// let input = with_mirrors(&[debt(1, 2, 500), debt(2, 3, 500)]).unwrap();
/// let output = Simplifier::default().simplify(&input).unwrap();
///
/// let payments = BalanceSet::from(output).settlements();
/// assert_eq!(payments.len(), 1);
/// assert_eq!(payments[0].from, MemberId::new(3));
/// assert_eq!(payments[0].to, MemberId::new(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    config: SimplifierConfig,
}

impl Simplifier {
    pub fn new(config: SimplifierConfig) -> Self {
        if !config.verify_symmetry {
            warn!("symmetry verification disabled; asymmetric input will not be rejected");
        }
        if !config.verify_conservation {
            warn!("conservation verification disabled");
        }
        Self { config }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Simplify a group's balances across all currencies.
    pub fn simplify(&self, edges: &[BalanceEdge]) -> Result<Vec<BalanceEdge>, SimplifyError> {
        self.simplify_with_report(edges).map(SimplificationResult::into_edges)
    }

    /// Like [`Simplifier::simplify`], also reporting per-currency figures.
    pub fn simplify_with_report(
        &self,
        edges: &[BalanceEdge],
    ) -> Result<SimplificationResult, SimplifyError> {
        let partition = partition_by_currency(edges);
        debug!(
            "simplifying {} rows over {} members in {} currencies",
            edges.len(),
            partition.members.len(),
            partition.subgraphs.len()
        );

        let mut simplified = Vec::with_capacity(edges.len());
        let mut report = SimplificationReport::default();
        for subgraph in &partition.subgraphs {
            let rows = self.simplify_currency(&partition.members, subgraph)?;
            report.currencies.push(CurrencyReport::new(subgraph, &rows));
            simplified.extend(rows);
        }

        Ok(SimplificationResult {
            edges: simplified,
            report,
        })
    }

    /// Simplify one currency's rows. `members` fixes the matrix index order
    /// and must contain every member the rows reference.
    pub fn simplify_currency(
        &self,
        members: &[MemberId],
        subgraph: &CurrencySubgraph,
    ) -> Result<Vec<BalanceEdge>, SimplifyError> {
        if self.config.verify_symmetry {
            verify_symmetric(subgraph)?;
        }

        let matrix = BalanceMatrix::build(members, subgraph)?;
        let imbalances = matrix.net_imbalances();
        let transfers = match_transfers(&imbalances)?;

        let mut rows = mirror_transfers(&matrix, subgraph, &transfers)?;
        pad_missing_pairs(&mut rows, subgraph);

        if self.config.verify_conservation {
            verify_conservation(&matrix, &imbalances, &rows)?;
        }

        debug!(
            "{}: {} rows, {} transfers",
            subgraph.currency,
            subgraph.len(),
            transfers.len()
        );
        Ok(rows)
    }
}

/// Check that every member ends up exactly where the input put it.
fn verify_conservation(
    matrix: &BalanceMatrix,
    imbalances: &[i128],
    rows: &[BalanceEdge],
) -> Result<(), SimplifyError> {
    let positions = NetPositions::from_edges(rows);
    for (index, &expected) in imbalances.iter().enumerate() {
        let member = matrix.member(index);
        let actual = positions.position(member, matrix.currency());
        if actual != expected {
            return Err(SimplifyError::ConservationViolated {
                member,
                currency: matrix.currency().clone(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Simplify with the default config.
pub fn simplify_balances(edges: &[BalanceEdge]) -> Result<Vec<BalanceEdge>, SimplifyError> {
    Simplifier::default().simplify(edges)
}
