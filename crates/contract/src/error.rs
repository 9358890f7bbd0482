//! Contract errors

use thiserror::Error;
use trafficledger_policy::Denial;
use trafficledger_store::StoreError;

/// Errors from contract operations
#[derive(Debug, Error)]
pub enum ContractError {
    // === Expected outcomes ===
    #[error("Access denied: {reason}")]
    AccessDenied { reason: Denial },

    #[error("Record {record_id} does not exist")]
    NotFound { record_id: String },

    #[error("Record {record_id} already exists")]
    AlreadyExists { record_id: String },

    #[error("Key {violation_id} does not hold a violation")]
    InvalidReference { violation_id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // === Collaborator failures ===
    #[error("Store failure: {cause}")]
    StoreFailure {
        #[from]
        cause: StoreError,
    },

    #[error("Failed to decode stored record {record_id}")]
    DecodeFailure { record_id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse error category, for mapping to response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AccessDenied,
    NotFound,
    AlreadyExists,
    InvalidReference,
    InvalidArgument,
    StoreFailure,
    DecodeFailure,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::AccessDenied { .. } => ErrorKind::AccessDenied,
            ContractError::NotFound { .. } => ErrorKind::NotFound,
            ContractError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            ContractError::InvalidReference { .. } => ErrorKind::InvalidReference,
            ContractError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ContractError::StoreFailure { .. } | ContractError::Serialization(_) => {
                ErrorKind::StoreFailure
            }
            ContractError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
        }
    }

    /// True for refusals a user can trigger, false for infrastructure faults
    pub fn is_expected(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::AccessDenied
                | ErrorKind::NotFound
                | ErrorKind::AlreadyExists
                | ErrorKind::InvalidReference
                | ErrorKind::InvalidArgument
        )
    }

    pub fn not_found(record_id: impl Into<String>) -> Self {
        ContractError::NotFound {
            record_id: record_id.into(),
        }
    }

    pub fn already_exists(record_id: impl Into<String>) -> Self {
        ContractError::AlreadyExists {
            record_id: record_id.into(),
        }
    }

    pub fn decode_failure(record_id: impl Into<String>) -> Self {
        ContractError::DecodeFailure {
            record_id: record_id.into(),
        }
    }
}

/// Result type for contract operations
pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let denied = ContractError::AccessDenied {
            reason: Denial::insufficient_role("only admin can delete violation"),
        };
        assert_eq!(denied.kind(), ErrorKind::AccessDenied);
        assert_eq!(ContractError::not_found("V1").kind(), ErrorKind::NotFound);
        assert_eq!(ContractError::already_exists("V1").kind(), ErrorKind::AlreadyExists);
        assert_eq!(ContractError::decode_failure("V1").kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn test_store_errors_are_not_expected() {
        let err: ContractError = StoreError::Poisoned.into();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert!(!err.is_expected());
        assert!(ContractError::not_found("V1").is_expected());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ContractError::not_found("V9").to_string(),
            "Record V9 does not exist"
        );
        let denied = ContractError::AccessDenied {
            reason: Denial::ownership_mismatch("access denied: violation does not belong to you"),
        };
        assert!(denied.to_string().contains("does not belong to you"));
    }
}
