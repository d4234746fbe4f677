use tracing::{debug, info};

use crate::{
    lookup::{Candidate, CandidateGenerator, LookupClient, LookupOutcome, PhoneNumber},
    resolve::record::ResolutionRecord,
};

/// One probe made while resolving a number.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub candidate: Candidate,
    pub outcome: LookupOutcome,
}

/// The record for a number plus the probes that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub record: ResolutionRecord,
    pub attempts: Vec<Attempt>,
}

pub struct ResolutionEngine<L> {
    generator: CandidateGenerator,
    client: L,
}

impl<L: LookupClient> ResolutionEngine<L> {
    pub fn new(generator: CandidateGenerator, client: L) -> Self {
        Self { generator, client }
    }

    pub fn handles(&self) -> &[String] {
        self.generator.handles()
    }

    /// Probe each candidate in order and stop at the first usable identity.
    ///
    /// Each handle is tried at most once. If none yields an identity the record is
    /// `Failed` and names the last candidate tried along with its failure.
    pub async fn resolve(&self, number: &PhoneNumber) -> Resolution {
        let candidates = self.generator.generate(number);
        let total = candidates.len();
        let mut attempts = Vec::with_capacity(total);
        let mut last_failure: Option<(String, String)> = None;

        for candidate in candidates {
            let outcome = self.client.probe(&candidate).await;

            match &outcome {
                LookupOutcome::Valid(identity) => {
                    info!("{} resolved to {} ({})", candidate, identity.name, identity.bank);
                    let record =
                        ResolutionRecord::success(number.clone(), identity.clone(), &candidate.handle);
                    attempts.push(Attempt { candidate, outcome });
                    return Resolution { record, attempts };
                }
                failure => {
                    let reason = failure.failure_reason().unwrap_or_default();
                    debug!("{} rejected: {}", candidate, reason);
                    last_failure = Some((candidate.address(), reason));
                }
            }

            attempts.push(Attempt { candidate, outcome });
        }

        let error = match last_failure {
            Some((address, reason)) => format!(
                "All {} UPI handles failed. Last error ({}): {}",
                total, address, reason
            ),
            None => "No UPI handles configured".to_string(),
        };
        info!("{} unresolved: {}", number, error);

        Resolution {
            record: ResolutionRecord::failed(number.clone(), error),
            attempts,
        }
    }
}
