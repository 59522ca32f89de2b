use super::*;

/// Parameter of `init_SettlementAuction`.
#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct InitParameter {
    /// Time from which bids are refused.
    pub end_time: Timestamp,
    /// Account the winning bid is paid out to.
    pub auctioneer: AccountAddress,
    /// Asset bids are placed in.
    pub bid_asset: BidAsset,
    /// Token the winner receives. It is deposited with the instance through
    /// `onReceivingCIS1` before the auction is claimed.
    pub prize: Option<Token>,
    /// Bids have to exceed this amount. Defaults to `DEFAULT_STARTING_BID`.
    pub starting_bid: Option<BidAmount>,
}

/// Parameter of the read-only entrypoints: the contract function that
/// receives the answer.
#[derive(Debug, Serialize, SchemaType)]
pub struct ViewParams {
    pub result_contract: ContractAddress,
    pub result_function: OwnedReceiveName,
}

impl ViewParams {
    /// Send `response` back to the querying contract.
    pub fn respond<A: HasActions, T: Serial>(&self, response: &T) -> A {
        send(
            &self.result_contract,
            self.result_function.as_ref(),
            Amount::zero(),
            response,
        )
    }
}

/// Current highest bid as reported to queries.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone, Copy)]
pub struct HighestBid {
    pub bidder: Address,
    pub bid: BidAmount,
}

/// Full snapshot of the auction.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone)]
pub struct AuctionInfo {
    pub highest_bid: HighestBid,
    pub end_time: Timestamp,
    pub auctioneer: AccountAddress,
    pub claimed: bool,
    pub bid_asset: BidAsset,
    pub prize: Option<Token>,
    pub prize_held: bool,
}
