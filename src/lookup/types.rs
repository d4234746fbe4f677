use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ResolverError, Result};

/// Marker the lookup service uses for "not applicable", and our default for absent fields.
pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_BANK: &str = "Unknown Bank";

/// A validated 10-digit mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const LEN: usize = 10;

    pub fn parse(raw: &str) -> Result<Self> {
        let number = raw.trim();
        if number.len() == Self::LEN && number.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(number.to_string()))
        } else {
            Err(ResolverError::InvalidNumber(number.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ResolverError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One (number, handle suffix) pair to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub number: PhoneNumber,
    pub handle: String,
}

impl Candidate {
    /// Fully-qualified address, e.g. `8900200543@ybl`.
    pub fn address(&self) -> String {
        format!("{}{}", self.number, self.handle)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.handle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub bank: String,
    pub vpa: String,
    pub ifsc: String,
}

impl Identity {
    /// Identity fields written on a failed record.
    pub fn unresolved() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            bank: NOT_AVAILABLE.to_string(),
            vpa: NOT_AVAILABLE.to_string(),
            ifsc: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Why a single probe did not reach the service or got nothing parseable back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Timeout,
    Status(u16),
    InvalidResponse,
    Request(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "timeout"),
            TransportError::Status(code) => write!(f, "http {}", code),
            TransportError::InvalidResponse => write!(f, "invalid response"),
            TransportError::Request(cause) => write!(f, "request error: {}", cause),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Valid(Identity),
    Invalid,
    TransportError(TransportError),
}

impl LookupOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, LookupOutcome::Valid(_))
    }

    /// Short cause for anything that is not `Valid`.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            LookupOutcome::Valid(_) => None,
            LookupOutcome::Invalid => Some("no valid data".to_string()),
            LookupOutcome::TransportError(e) => Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ten_digit_numbers() {
        let number = PhoneNumber::parse(" 8900200543\r").unwrap();
        assert_eq!(number.as_str(), "8900200543");
    }

    #[test]
    fn rejects_malformed_numbers() {
        for raw in ["12345", "89002005430", "89002a0543", "", "+918900200543"] {
            assert!(PhoneNumber::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn candidate_address_joins_number_and_handle() {
        let candidate = Candidate {
            number: PhoneNumber::parse("8900200543").unwrap(),
            handle: "@ybl".to_string(),
        };
        assert_eq!(candidate.address(), "8900200543@ybl");
        assert_eq!(candidate.to_string(), "8900200543@ybl");
    }

    #[test]
    fn failure_reasons() {
        assert_eq!(LookupOutcome::Invalid.failure_reason().unwrap(), "no valid data");
        assert_eq!(
            LookupOutcome::TransportError(TransportError::Status(503))
                .failure_reason()
                .unwrap(),
            "http 503"
        );
        assert!(LookupOutcome::Valid(Identity::unresolved())
            .failure_reason()
            .is_none());
    }
}
