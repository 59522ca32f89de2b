use super::*;

/// An accepted bid, native or token.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct BidEvent {
    pub bidder: AccountAddress,
    pub amount: BidAmount,
    /// Bid that is being refunded.
    pub displaced: Option<DisplacedBid>,
}

/// Auction claimed.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ClaimEvent {
    pub auctioneer: AccountAddress,
    pub winner: Option<AccountAddress>,
    /// Amount paid out to the auctioneer.
    pub price: BidAmount,
    /// Prize transferred on claim, `None` if the instance held none.
    pub prize: Option<Token>,
}

/// Prize deposited with the instance.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct PrizeEvent {
    pub from: AccountAddress,
    pub prize: Token,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    Bid(BidEvent),
    Claim(ClaimEvent),
    Prize(PrizeEvent),
}

impl CustomEvent {
    pub fn bid(accepted: &AcceptedBid) -> Self {
        Self::Bid(BidEvent {
            bidder: accepted.bidder,
            amount: accepted.amount,
            displaced: accepted.displaced,
        })
    }

    pub fn claim(state: &State, settlement: &Settlement) -> Self {
        Self::Claim(ClaimEvent {
            auctioneer: state.auctioneer,
            winner: settlement.winner,
            price: settlement.price,
            prize: state.held_prize().cloned(),
        })
    }

    pub fn prize(deposit: &PrizeDeposit) -> Self {
        Self::Prize(PrizeEvent {
            from: deposit.from,
            prize: deposit.prize.clone(),
        })
    }
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::Bid(event) => {
                out.write_u8(BID_TAG)?;
                event.serial(out)
            }
            CustomEvent::Claim(event) => {
                out.write_u8(CLAIM_TAG)?;
                event.serial(out)
            }
            CustomEvent::Prize(event) => {
                out.write_u8(PRIZE_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            BID_TAG => BidEvent::deserial(source).map(CustomEvent::Bid),
            CLAIM_TAG => ClaimEvent::deserial(source).map(CustomEvent::Claim),
            PRIZE_TAG => PrizeEvent::deserial(source).map(CustomEvent::Prize),
            _ => Err(ParseError::default()),
        }
    }
}
