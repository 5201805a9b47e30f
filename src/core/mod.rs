pub mod amount;
pub mod balance;
pub mod currency;
pub mod error;
pub mod ledger;
pub mod member;
