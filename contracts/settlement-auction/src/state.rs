use super::*;

/// Asset bids are placed in. Fixed at initialization, it decides which of
/// the two bidding entrypoints is trusted.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone)]
pub enum BidAsset {
    /// CCD attached to `bid`.
    Ccd,
    /// A CIS1 token deposited through `onReceivingCIS1`.
    Token(Token),
}

/// Lifecycle of the auction at a given slot time.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuctionPhase {
    /// Bids are accepted.
    Open,
    /// End time reached, proceeds not claimed yet.
    Ended,
    /// Terminal.
    Claimed,
}

/// A bid that has been outbid. It MUST be refunded.
#[must_use]
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone, Copy)]
pub struct DisplacedBid {
    pub account: AccountAddress,
    pub amount: BidAmount,
}

/// The contract state.
#[contract_state(contract = "SettlementAuction")]
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct State {
    /// Bids are refused from this time on.
    pub end_time: Timestamp,
    /// Account that receives the winning bid.
    pub auctioneer: AccountAddress,
    pub bid_asset: BidAsset,
    /// Token handed over to the winner on claim.
    pub prize: Option<Token>,
    /// Whether `prize` has been deposited with the instance.
    pub prize_held: bool,
    /// `None` as long as nobody has bid.
    pub highest_bidder: Option<AccountAddress>,
    pub highest_bid: BidAmount,
    pub claimed: bool,
}

impl State {
    pub fn new(parameter: InitParameter) -> Self {
        Self {
            end_time: parameter.end_time,
            auctioneer: parameter.auctioneer,
            bid_asset: parameter.bid_asset,
            prize: parameter.prize,
            prize_held: false,
            highest_bidder: None,
            highest_bid: parameter.starting_bid.unwrap_or(DEFAULT_STARTING_BID),
            claimed: false,
        }
    }

    pub fn phase(&self, now: Timestamp) -> AuctionPhase {
        if self.claimed {
            AuctionPhase::Claimed
        } else if now < self.end_time {
            AuctionPhase::Open
        } else {
            AuctionPhase::Ended
        }
    }

    /// The prize, once the instance owns it.
    pub fn held_prize(&self) -> Option<&Token> {
        self.prize.as_ref().filter(|_| self.prize_held)
    }

    /// Replace the highest bid. Returns the bid it displaced, if a real one
    /// was in place.
    pub(crate) fn record_bid(
        &mut self,
        bidder: AccountAddress,
        amount: BidAmount,
    ) -> Option<DisplacedBid> {
        let previous_amount = core::mem::replace(&mut self.highest_bid, amount);
        self.highest_bidder
            .replace(bidder)
            .map(|account| DisplacedBid {
                account,
                amount: previous_amount,
            })
    }

    /// Current leader. The instance itself stands in while nobody has bid.
    pub fn get_highest_bid(&self, instance: ContractAddress) -> HighestBid {
        HighestBid {
            bidder: self
                .highest_bidder
                .map(Address::Account)
                .unwrap_or(Address::Contract(instance)),
            bid: self.highest_bid,
        }
    }

    pub fn get_auction_end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn get_auctioneer(&self) -> AccountAddress {
        self.auctioneer
    }

    pub fn get_claimed(&self) -> bool {
        self.claimed
    }

    pub fn get_auction_info(&self, instance: ContractAddress) -> AuctionInfo {
        AuctionInfo {
            highest_bid: self.get_highest_bid(instance),
            end_time: self.end_time,
            auctioneer: self.auctioneer,
            claimed: self.claimed,
            bid_asset: self.bid_asset.clone(),
            prize: self.prize.clone(),
            prize_held: self.prize_held,
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[concordium_test]
    fn test_new_state_has_no_bidder() {
        let state = State::new(ccd_parameter());

        claim_eq!(state.highest_bidder, None);
        claim_eq!(state.highest_bid, DEFAULT_STARTING_BID);
        claim!(!state.claimed, "Fresh auction must not be claimed");
        claim_eq!(
            state.get_highest_bid(INSTANCE),
            HighestBid {
                bidder: Address::Contract(INSTANCE),
                bid: 0,
            },
            "The instance stands in as bidder until the first bid"
        );
    }

    #[concordium_test]
    fn test_starting_bid() {
        let mut parameter = ccd_parameter();
        parameter.starting_bid = Some(500);
        let state = State::new(parameter);

        claim_eq!(state.get_highest_bid(INSTANCE).bid, 500);
        claim_eq!(state.highest_bidder, None);
    }

    #[concordium_test]
    fn test_phase() {
        let mut state = State::new(ccd_parameter());

        claim_eq!(state.phase(time(START)), AuctionPhase::Open);
        claim_eq!(state.phase(time(END - 1)), AuctionPhase::Open);
        claim_eq!(state.phase(time(END)), AuctionPhase::Ended);
        claim_eq!(state.phase(time(END + 1)), AuctionPhase::Ended);

        state.claimed = true;
        claim_eq!(state.phase(time(END + 1)), AuctionPhase::Claimed);
    }

    #[concordium_test]
    fn test_record_bid_returns_displaced_bid() {
        let mut state = State::new(ccd_parameter());

        claim_eq!(state.record_bid(ALICE, 1), None);
        claim_eq!(
            state.record_bid(BOB, 2),
            Some(DisplacedBid {
                account: ALICE,
                amount: 1,
            })
        );
        claim_eq!(state.highest_bidder, Some(BOB));
        claim_eq!(state.highest_bid, 2);
    }

    #[concordium_test]
    fn test_auction_info() {
        let mut state = State::new(token_parameter());
        let _ = state.record_bid(ALICE, 5);

        let info = state.get_auction_info(INSTANCE);

        claim_eq!(
            info.highest_bid,
            HighestBid {
                bidder: Address::Account(ALICE),
                bid: 5,
            }
        );
        claim_eq!(info.end_time, time(END));
        claim_eq!(info.auctioneer, AUCTIONEER);
        claim!(!info.claimed);
        claim_eq!(info.bid_asset, BidAsset::Token(bid_token()));
        claim_eq!(info.prize, Some(prize_token()));
        claim!(!info.prize_held);
    }

    #[concordium_test]
    fn test_held_prize() {
        let mut state = State::new(ccd_parameter());
        claim_eq!(state.held_prize(), None, "Prize not deposited yet");

        state.prize_held = true;
        claim_eq!(state.held_prize(), Some(&prize_token()));

        state.prize = None;
        claim_eq!(state.held_prize(), None, "No prize configured");
    }
}
