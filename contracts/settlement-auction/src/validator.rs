use super::*;

/// A bid that made it into the state.
#[derive(Debug, PartialEq, Eq)]
pub struct AcceptedBid {
    pub bidder: AccountAddress,
    pub amount: BidAmount,
    /// Bid that lost its place.
    pub displaced: Option<DisplacedBid>,
    /// Refund of `displaced`, empty for the first bid.
    pub dispatches: Vec<Dispatch>,
}

/// Admit `amount` from `bidder` at `now`, record it and refund the displaced
/// bid in the auction's bid asset.
///
/// The state is only written after every check passed, and the refund is
/// built from the already committed state change.
pub fn accept_bid(
    state: &mut State,
    now: Timestamp,
    bidder: AccountAddress,
    amount: BidAmount,
) -> Result<AcceptedBid, CustomContractError> {
    ensure!(
        state.phase(now) == AuctionPhase::Open,
        CustomContractError::AuctionEnded
    );
    ensure!(amount > state.highest_bid, CustomContractError::BidTooLow);

    let displaced = state.record_bid(bidder, amount);

    let dispatches = displaced
        .iter()
        .map(|bid| Dispatch::bid_asset(&state.bid_asset, bid.account, bid.amount))
        .collect();

    Ok(AcceptedBid {
        bidder,
        amount,
        displaced,
        dispatches,
    })
}

/// Bid with the CCD attached to the call.
///
/// It rejects if:
/// - The auction takes its bids in a CIS1 token.
/// - The sender is a contract.
/// - The auction has ended.
/// - `amount` does not exceed the highest bid.
pub fn bid(
    state: &mut State,
    now: Timestamp,
    sender: Address,
    amount: Amount,
) -> Result<AcceptedBid, CustomContractError> {
    ensure!(
        state.bid_asset == BidAsset::Ccd,
        CustomContractError::UnsupportedAsset
    );

    let bidder = match sender {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    };

    accept_bid(state, now, bidder, amount.micro_ccd)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn ccd(micro_ccd: u64) -> Amount {
        Amount::from_micro_ccd(micro_ccd)
    }

    #[concordium_test]
    fn test_first_bid_dispatches_nothing() {
        let mut state = State::new(ccd_parameter());

        let accepted = bid(&mut state, time(START), Address::Account(ALICE), ccd(1))
            .expect_report("First bid should pass");

        claim_eq!(accepted.displaced, None);
        claim!(accepted.dispatches.is_empty(), "No refund on the first bid");
        claim_eq!(state.highest_bidder, Some(ALICE));
        claim_eq!(state.highest_bid, 1);
    }

    #[concordium_test]
    fn test_outbid_refunds_previous_bidder() {
        let mut state = State::new(ccd_parameter());
        bid(&mut state, time(START), Address::Account(ALICE), ccd(1))
            .expect_report("Alice's bid should pass");

        let accepted = bid(&mut state, time(START + 1), Address::Account(BOB), ccd(2))
            .expect_report("Bob's bid should pass");

        claim_eq!(
            accepted.dispatches,
            vec![Dispatch::Ccd {
                to: ALICE,
                amount: ccd(1),
            }],
            "Alice must get exactly her bid back"
        );
        claim_eq!(state.get_highest_bid(INSTANCE).bidder, Address::Account(BOB));
        claim_eq!(state.highest_bid, 2);
    }

    #[concordium_test]
    fn test_low_bid_leaves_state_untouched() {
        let mut state = State::new(ccd_parameter());
        bid(&mut state, time(START), Address::Account(ALICE), ccd(1))
            .expect_report("Alice's bid should pass");
        bid(&mut state, time(START), Address::Account(BOB), ccd(2))
            .expect_report("Bob's bid should pass");

        let equal = bid(&mut state, time(START), Address::Account(CAROL), ccd(2));
        claim_eq!(equal, Err(CustomContractError::BidTooLow));
        let lower = bid(&mut state, time(START), Address::Account(CAROL), ccd(1));
        claim_eq!(lower, Err(CustomContractError::BidTooLow));

        claim_eq!(state.highest_bidder, Some(BOB));
        claim_eq!(state.highest_bid, 2);
    }

    #[concordium_test]
    fn test_bid_at_end_time_is_refused() {
        let mut state = State::new(ccd_parameter());

        let result = bid(&mut state, time(END), Address::Account(ALICE), ccd(5));

        claim_eq!(result, Err(CustomContractError::AuctionEnded));
        claim_eq!(state.highest_bidder, None);
    }

    #[concordium_test]
    fn test_contract_cannot_bid() {
        let mut state = State::new(ccd_parameter());

        let result = bid(&mut state, time(START), Address::Contract(NFT_CONTRACT), ccd(5));

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }

    #[concordium_test]
    fn test_ccd_bid_on_token_auction_is_refused() {
        let mut state = State::new(token_parameter());

        let result = bid(&mut state, time(START), Address::Account(ALICE), ccd(50_000));

        claim_eq!(result, Err(CustomContractError::UnsupportedAsset));
        claim_eq!(state.highest_bidder, None);
    }

    #[concordium_test]
    fn test_accepted_bids_strictly_increase() {
        let mut state = State::new(ccd_parameter());
        let bidders = [ALICE, BOB, CAROL];
        let amounts = [3u64, 3, 7, 5, 8, 8, 20, 19, 21];
        let mut previous: Option<(AccountAddress, u64)> = None;

        for (i, &amount) in amounts.iter().enumerate() {
            let bidder = bidders[i % bidders.len()];
            let before = state.highest_bid;

            match bid(&mut state, time(START), Address::Account(bidder), ccd(amount)) {
                Ok(accepted) => {
                    claim!(amount > before, "Accepted bids must exceed the highest bid");
                    claim_eq!(state.highest_bidder, Some(bidder));
                    claim_eq!(state.highest_bid, amount);
                    let expected_refund: Vec<Dispatch> = previous
                        .iter()
                        .map(|&(account, amount)| Dispatch::Ccd {
                            to: account,
                            amount: ccd(amount),
                        })
                        .collect();
                    claim_eq!(accepted.dispatches, expected_refund);
                    previous = Some((bidder, amount));
                }
                Err(err) => {
                    claim_eq!(err, CustomContractError::BidTooLow);
                    claim!(amount <= before);
                    claim_eq!(state.highest_bid, before);
                }
            }
        }

        claim_eq!(state.highest_bid, 21);
    }
}
