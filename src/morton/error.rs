/// Errors raised by the Morton transform and the chunk layout built on it.
///
/// Both kinds are caller bugs: the computation is deterministic, so nothing
/// here is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MortonError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("{what} {value} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        value: u64,
        limit: u64,
    },
}

impl MortonError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MortonError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: u64, limit: u64) -> Self {
        MortonError::OutOfRange { what, value, limit }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, MortonError::InvalidArgument { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, MortonError::OutOfRange { .. })
    }
}

pub type MortonResult<T> = Result<T, MortonError>;
