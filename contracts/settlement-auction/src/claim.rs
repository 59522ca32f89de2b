use super::*;

/// Outcome of a successful claim.
#[derive(Debug, PartialEq, Eq)]
pub struct Settlement {
    /// `None` if nobody bid.
    pub winner: Option<AccountAddress>,
    /// Amount paid out to the auctioneer.
    pub price: BidAmount,
    pub dispatches: Vec<Dispatch>,
}

/// Close the auction for good and pay everybody out.
///
/// The winning bid goes to the auctioneer and the prize, if the instance
/// holds it, to the winner. Without a single bid there is nothing to pay out
/// and the prize goes back to the auctioneer. `claimed` is set before any
/// transfer is issued and is never reset, whatever happens to the transfers.
///
/// It rejects if:
/// - The end time has not passed yet.
/// - The auction was already claimed.
pub fn claim(state: &mut State, now: Timestamp) -> Result<Settlement, CustomContractError> {
    ensure!(now > state.end_time, CustomContractError::AuctionNotEnded);
    ensure!(!state.claimed, CustomContractError::AlreadyClaimed);

    state.claimed = true;

    let mut dispatches = Vec::with_capacity(2);
    let price = match state.highest_bidder {
        Some(winner) => {
            dispatches.push(Dispatch::bid_asset(
                &state.bid_asset,
                state.auctioneer,
                state.highest_bid,
            ));
            if let Some(prize) = state.held_prize() {
                dispatches.push(Dispatch::prize(prize, winner));
            }
            state.highest_bid
        }
        None => {
            if let Some(prize) = state.held_prize() {
                dispatches.push(Dispatch::prize(prize, state.auctioneer));
            }
            0
        }
    };

    Ok(Settlement {
        winner: state.highest_bidder,
        price,
        dispatches,
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn state_won_by_bob() -> State {
        let mut state = State::new(ccd_parameter());
        state.prize_held = true;
        bid(
            &mut state,
            time(START),
            Address::Account(ALICE),
            Amount::from_micro_ccd(1),
        )
        .expect_report("Alice's bid should pass");
        bid(
            &mut state,
            time(START),
            Address::Account(BOB),
            Amount::from_micro_ccd(2),
        )
        .expect_report("Bob's bid should pass");
        state
    }

    #[concordium_test]
    fn test_claim_before_end() {
        let mut state = state_won_by_bob();

        claim_eq!(
            claim(&mut state, time(START + 30)),
            Err(CustomContractError::AuctionNotEnded)
        );
        claim_eq!(
            claim(&mut state, time(END)),
            Err(CustomContractError::AuctionNotEnded),
            "Claiming exactly at the end time is too early"
        );
        claim!(!state.claimed);
    }

    #[concordium_test]
    fn test_claim_pays_auctioneer_and_winner() {
        let mut state = state_won_by_bob();

        let settlement = claim(&mut state, time(END + 1)).expect_report("Claim should pass");

        claim_eq!(settlement.winner, Some(BOB));
        claim_eq!(settlement.price, 2);
        claim_eq!(
            settlement.dispatches,
            vec![
                Dispatch::Ccd {
                    to: AUCTIONEER,
                    amount: Amount::from_micro_ccd(2),
                },
                Dispatch::Token {
                    token: prize_token(),
                    amount: 1,
                    to: BOB,
                },
            ]
        );
        claim!(state.claimed);
        claim_eq!(state.phase(time(END + 1)), AuctionPhase::Claimed);
    }

    #[concordium_test]
    fn test_second_claim_fails() {
        let mut state = state_won_by_bob();
        claim(&mut state, time(END + 1)).expect_report("Claim should pass");

        claim_eq!(
            claim(&mut state, time(END + 2)),
            Err(CustomContractError::AlreadyClaimed)
        );
        claim!(state.claimed);
    }

    #[concordium_test]
    fn test_claim_without_prize() {
        let mut parameter = ccd_parameter();
        parameter.prize = None;
        let mut state = State::new(parameter);
        bid(
            &mut state,
            time(START),
            Address::Account(ALICE),
            Amount::from_micro_ccd(40),
        )
        .expect_report("Alice's bid should pass");

        let settlement = claim(&mut state, time(END + 1)).expect_report("Claim should pass");

        claim_eq!(
            settlement.dispatches,
            vec![Dispatch::Ccd {
                to: AUCTIONEER,
                amount: Amount::from_micro_ccd(40),
            }]
        );
    }

    #[concordium_test]
    fn test_token_auction_pays_in_tokens() {
        let mut state = State::new(token_parameter());
        state.prize_held = true;
        let _ = state.record_bid(CAROL, 70_000);

        let settlement = claim(&mut state, time(END + 1)).expect_report("Claim should pass");

        claim_eq!(
            settlement.dispatches,
            vec![
                Dispatch::Token {
                    token: bid_token(),
                    amount: 70_000,
                    to: AUCTIONEER,
                },
                Dispatch::Token {
                    token: prize_token(),
                    amount: 1,
                    to: CAROL,
                },
            ]
        );
    }

    #[concordium_test]
    fn test_unsold_prize_returns_to_auctioneer() {
        let mut state = State::new(ccd_parameter());
        state.prize_held = true;

        let settlement = claim(&mut state, time(END + 1)).expect_report("Claim should pass");

        claim_eq!(settlement.winner, None);
        claim_eq!(settlement.price, 0);
        claim_eq!(
            settlement.dispatches,
            vec![Dispatch::Token {
                token: prize_token(),
                amount: 1,
                to: AUCTIONEER,
            }]
        );
        claim!(state.claimed);
    }

    #[concordium_test]
    fn test_prize_never_deposited_is_not_sent() {
        let mut state = State::new(ccd_parameter());
        bid(
            &mut state,
            time(START),
            Address::Account(ALICE),
            Amount::from_micro_ccd(1),
        )
        .expect_report("Alice's bid should pass");

        let settlement = claim(&mut state, time(END + 1)).expect_report("Claim should pass");

        claim_eq!(
            settlement.dispatches,
            vec![Dispatch::Ccd {
                to: AUCTIONEER,
                amount: Amount::from_micro_ccd(1),
            }],
            "Only the payout is dispatched"
        );
        claim!(state.claimed);
    }
}
