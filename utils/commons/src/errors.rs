use super::*;

/// The custom errors the contracts can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Failing to mint a token because the token ID already exists in the
    /// registry (Error code: -4).
    TokenIdAlreadyExists,
    /// Only account addresses may perform this action (Error code: -5).
    OnlyAccountAddress,
    /// This function must only be called by a contract (Error code: -6).
    ContractOnly,
    /// Received a token other than the one under auction (Error code: -7).
    UnexpectedToken,
    /// The auction was already started (Error code: -8).
    AlreadyStarted,
    /// The auction has not been started yet (Error code: -9).
    NotStarted,
    /// The auction was already ended (Error code: -10).
    AlreadyEnded,
    /// Attempt to end the auction before its deadline (Error code: -11).
    TooEarly,
    /// Bids are only accepted while the auction is live (Error code: -12).
    AuctionNotActive,
    /// The bid does not clear the required threshold (Error code: -13).
    BidTooLow,
    /// The auction deadline does not fit a timestamp (Error code: -14).
    InvalidDuration,
    /// Failed to invoke a contract (Error code: -15).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -16).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError.
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
