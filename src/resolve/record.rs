use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lookup::{Identity, PhoneNumber};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Success,
    Failed,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Success => write!(f, "Success"),
            RecordStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// The single verdict for one phone number. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub mobile: PhoneNumber,
    pub name: String,
    pub bank: String,
    pub vpa: String,
    pub ifsc: String,
    pub upi_handle: Option<String>,
    pub status: RecordStatus,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionRecord {
    pub fn success(mobile: PhoneNumber, identity: Identity, handle: &str) -> Self {
        Self {
            mobile,
            name: identity.name,
            bank: identity.bank,
            vpa: identity.vpa,
            ifsc: identity.ifsc,
            upi_handle: Some(handle.to_string()),
            status: RecordStatus::Success,
            timestamp: now_stamp(),
            error: None,
        }
    }

    pub fn failed(mobile: PhoneNumber, error: String) -> Self {
        let identity = Identity::unresolved();
        Self {
            mobile,
            name: identity.name,
            bank: identity.bank,
            vpa: identity.vpa,
            ifsc: identity.ifsc,
            upi_handle: None,
            status: RecordStatus::Failed,
            timestamp: now_stamp(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }

    /// Text searched by the free-text results filter.
    pub fn search_text(&self) -> String {
        format!("{} {} {} {}", self.mobile, self.name, self.bank, self.vpa).to_lowercase()
    }
}

fn now_stamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
