//! # settlement-engine
//!
//! Multi-currency debt simplification for shared-expense groups.
//!
//! Given the pairwise net balances between members of a group, this engine
//! computes the fewest point-to-point payments that settle every debt,
//! currency by currency, leaving each member's net position unchanged to
//! the minor unit.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: balance rows, members, currencies, net positions
//! - **graph**: Currency partitioning, balance matrix, complete-graph helpers
//! - **optimization**: Greedy min-cash-flow matching, mirroring and padding
//! - **simulation**: Random balance networks for benchmarks and demos

pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::amount::Amount;
    pub use crate::core::balance::{BalanceEdge, BalanceSet, Settlement};
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::error::SimplifyError;
    pub use crate::core::ledger::NetPositions;
    pub use crate::core::member::{GroupId, MemberId};
    pub use crate::graph::complete::{pad_to_complete, with_mirrors};
    pub use crate::optimization::simplifier::{
        simplify_balances, SimplificationReport, SimplificationResult, Simplifier,
        SimplifierConfig,
    };
}
