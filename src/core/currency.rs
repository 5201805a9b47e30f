use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-style currency code.
///
/// Balances in different currencies are never merged: each code gets its
/// own subgraph and its own simplification pass.
///
/// # Examples
///
/// ```
/// use settlement_engine::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let eur = CurrencyCode::new("EUR");
/// assert_ne!(usd, eur);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits in the currency's minor unit.
    ///
    /// Only used to render amounts for people; the engine itself works on
    /// minor units and never looks at this. Unknown codes default to 2.
    pub fn decimal_digits(&self) -> u32 {
        match self.0.to_ascii_uppercase().as_str() {
            "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
            | "UGX" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
            "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("USD");
        let b = CurrencyCode::from("USD");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "USD");
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(CurrencyCode::new("USD").decimal_digits(), 2);
        assert_eq!(CurrencyCode::new("jpy").decimal_digits(), 0);
        assert_eq!(CurrencyCode::new("KWD").decimal_digits(), 3);
        assert_eq!(CurrencyCode::new("XYZ").decimal_digits(), 2);
    }

    #[test]
    fn test_currency_ordering() {
        assert!(CurrencyCode::new("EUR") < CurrencyCode::new("USD"));
    }
}
