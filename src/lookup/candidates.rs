use crate::lookup::types::{Candidate, PhoneNumber};

/// Expands a number into one candidate per configured handle, in priority order.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    handles: Vec<String>,
}

impl CandidateGenerator {
    pub fn new(handles: Vec<String>) -> Self {
        Self { handles }
    }

    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    pub fn generate(&self, number: &PhoneNumber) -> Vec<Candidate> {
        self.handles
            .iter()
            .map(|handle| Candidate {
                number: number.clone(),
                handle: handle.clone(),
            })
            .collect()
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_HANDLES
                .iter()
                .map(|h| h.to_string())
                .collect(),
        )
    }
}
