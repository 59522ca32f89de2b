use super::*;

/// Tag for the Custom Bid event.
pub const BID_TAG: u8 = u8::MAX - 11;

/// Tag for the Custom Claim event.
pub const CLAIM_TAG: u8 = u8::MAX - 12;

/// Tag for the Custom Prize event.
pub const PRIZE_TAG: u8 = u8::MAX - 13;

/// Highest bid of an auction that was opened without a starting bid. Any
/// positive bid exceeds it.
pub const DEFAULT_STARTING_BID: BidAmount = 0;

/// Units of a non-fungible token moved by a single transfer.
pub const NFT_AMOUNT: TokenAmount = 1;
