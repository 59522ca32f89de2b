use super::*;

/// Contract token ID type.
pub type ContractTokenId = TokenIdVec;

/// Wrapping the custom errors in a type with CIS1 errors.
pub type ContractError = Cis1Error<CustomContractError>;

pub type ContractResult<A> = Result<A, ContractError>;

/// Size of a bid in the smallest unit of the auction's bid asset, i.e.
/// micro CCD for CCD auctions and raw token units for CIS1 token auctions.
pub type BidAmount = u64;
