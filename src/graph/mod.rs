pub mod balance_matrix;
pub mod complete;
pub mod partition;
