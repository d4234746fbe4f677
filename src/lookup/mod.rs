pub mod candidates;
pub mod client;
pub mod types;

pub use candidates::CandidateGenerator;
pub use client::{classify_body, HttpLookupClient, LookupClient};
pub use types::{
    Candidate, Identity, LookupOutcome, PhoneNumber, TransportError, NOT_AVAILABLE, UNKNOWN_BANK,
};
