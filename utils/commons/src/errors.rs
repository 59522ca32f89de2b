use super::*;

/// The custom errors the contract can produce. The reject code of a failed
/// call identifies the variant, and with it the rejection reason.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy, Reject)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Raised if a bid arrives at or after the auction end time (Error code: -4).
    AuctionEnded,
    /// Raised if the auction is claimed before its end time (Error code: -5).
    AuctionNotEnded,
    /// Raised if a bid does not exceed the highest bid (Error code: -6).
    BidTooLow,
    /// Raised if the auction has already been claimed (Error code: -7).
    AlreadyClaimed,
    /// Raised if a bid is placed in an asset the auction does not accept
    /// (Error code: -8).
    UnsupportedAsset,
    /// Only account addresses can bid (Error code: -9).
    OnlyAccountAddress,
    /// Raised if the prize is deposited twice or in an amount other than one
    /// (Error code: -10).
    InvalidPrizeDeposit,
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

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis1Error::Custom(c)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_error_conversions() {
        claim_eq!(
            CustomContractError::from(LogError::Full),
            CustomContractError::LogFull
        );
        claim_eq!(
            CustomContractError::from(ParseError::default()),
            CustomContractError::ParseParams
        );
        claim_eq!(
            ContractError::from(CustomContractError::AlreadyClaimed),
            Cis1Error::Custom(CustomContractError::AlreadyClaimed)
        );
    }
}
