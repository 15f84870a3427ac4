use crate::error::CollectorError;

/// Why a candidate was left out without being recorded as an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No candidate identifier; nothing to query
    MissingId,
    /// Upstream rejected the donation query as malformed (HTTP 400)
    BadRequest,
    /// Donation query succeeded with zero qualifying receipts
    NoQualifyingDonations,
    /// Committee lookup failed or returned nothing
    NoCommittees,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingId => write!(f, "missing candidate id"),
            SkipReason::BadRequest => write!(f, "400 Bad Request"),
            SkipReason::NoQualifyingDonations => write!(f, "no qualifying donations"),
            SkipReason::NoCommittees => write!(f, "no associated committees"),
        }
    }
}

/// Result of processing one unit of work (a page or a candidate)
#[derive(Debug)]
pub enum Outcome<T> {
    Accepted(T),
    /// Left out on purpose; not an error
    Skipped(SkipReason),
    /// Failed for this unit only; record it and move on
    RecoveredError(CollectorError),
    /// Cannot continue the current operation
    Fatal(CollectorError),
}

impl<T> Outcome<T> {
    /// Classify a failed request made on behalf of a single unit of work.
    pub fn from_error(err: CollectorError) -> Self {
        if err.is_bad_request() {
            Outcome::Skipped(SkipReason::BadRequest)
        } else if err.is_request_failure() {
            Outcome::RecoveredError(err)
        } else {
            Outcome::Fatal(err)
        }
    }
}
