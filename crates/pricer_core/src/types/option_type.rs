//! Option side (call or put).

use std::fmt;
use std::str::FromStr;

/// Side of a European option contract.
///
/// Serialises as lowercase `"call"` / `"put"`, which is also the form used in
/// comparison files. Parsing additionally accepts the exchange leg codes
/// `CE` (call) and `PE` (put).
///
/// # Examples
///
/// ```
/// use pricer_core::types::OptionType;
///
/// assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert_eq!("PE".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert_eq!(OptionType::Put.to_string(), "put");
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionType {
    /// Returns the lowercase name (`"call"` or `"put"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CALL" | "C" | "CE" => Ok(OptionType::Call),
            "PUT" | "P" | "PE" => Ok(OptionType::Put),
            _ => Err(format!("Unknown option type: {}", s)),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
