use serde::{Deserialize, Serialize};

use crate::fec::types::{Candidate, Committee};

/// Committee as persisted: id and name only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeRef {
    pub committee_id: String,
    pub name: String,
}

impl From<Committee> for CommitteeRef {
    fn from(committee: Committee) -> Self {
        Self {
            committee_id: committee.committee_id,
            name: committee.name,
        }
    }
}

/// Candidate that passed the donation filter, with its committees.
/// `committees` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredCandidate {
    pub name: String,
    pub candidate_id: String,
    pub committees: Vec<CommitteeRef>,
}

/// Candidate whose donation check failed and should be retried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub name: String,
    pub candidate_id: String,
}

impl From<&Candidate> for ErrorRecord {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            candidate_id: candidate.candidate_id.clone(),
        }
    }
}

impl From<ErrorRecord> for Candidate {
    fn from(record: ErrorRecord) -> Self {
        Candidate::new(record.candidate_id, record.name)
    }
}
