use super::*;

/// Init function that opens a new auction.
#[init(contract = "SettlementAuction", parameter = "InitParameter")]
fn auction_init(ctx: &impl HasInitContext) -> InitResult<State> {
    let parameter: InitParameter = ctx.parameter_cursor().get()?;
    Ok(State::new(parameter))
}

/// Bid with the attached CCD. Refunds the bid it displaces.
///
/// It rejects if:
/// - The auction takes its bids in a CIS1 token.
/// - The sender is a contract.
/// - The auction has ended.
/// - The attached amount does not exceed the highest bid.
/// - It fails to log the bid event.
#[receive(contract = "SettlementAuction", name = "bid", enable_logger, payable)]
fn auction_bid<A: HasActions>(
    ctx: &impl HasReceiveContext,
    amount: Amount,
    logger: &mut impl HasLogger,
    state: &mut State,
) -> ContractResult<A> {
    let accepted = bid(state, ctx.metadata().slot_time(), ctx.sender(), amount)?;

    logger.log(&CustomEvent::bid(&accepted))?;

    Ok(into_actions(accepted.dispatches, ctx.self_address()))
}

/// CIS1 receive hook. A deposit of the bid token becomes a bid, a deposit of
/// the prize token puts the prize in the custody of the instance.
///
/// The deposit receipt is the outcome of the call: accepting keeps the whole
/// deposit, rejecting makes the token contract roll the transfer back so the
/// full amount is returned to its sender.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is neither the prize contract nor the bid token contract, or
///   the token id differs.
/// - The deposit comes from a contract.
/// - A bid arrives after the end or does not exceed the highest bid.
/// - The prize is already held or is not a single unit.
/// - The prize arrives after the auction was claimed.
/// - It fails to log the event.
#[receive(contract = "SettlementAuction", name = "onReceivingCIS1", enable_logger)]
fn auction_on_receiving_cis1<A: HasActions>(
    ctx: &impl HasReceiveContext,
    logger: &mut impl HasLogger,
    state: &mut State,
) -> ContractResult<A> {
    let notification: OnReceivingCis1Params<ContractTokenId> = ctx.parameter_cursor().get()?;

    let deposit = on_deposit_notification(
        state,
        ctx.metadata().slot_time(),
        ctx.sender(),
        &notification,
    )
    .map_err(|rejection| rejection.error)?;

    match deposit.deposited {
        Deposited::Bid(accepted) => {
            logger.log(&CustomEvent::bid(&accepted))?;
            Ok(into_actions(accepted.dispatches, ctx.self_address()))
        }
        Deposited::Prize(prize) => {
            logger.log(&CustomEvent::prize(&prize))?;
            Ok(A::accept())
        }
    }
}

/// Claim the auction once it has ended: pay the winning bid to the
/// auctioneer and transfer the prize to the winner.
///
/// It rejects if:
/// - The end time has not passed.
/// - The auction was already claimed.
/// - It fails to log the claim event.
#[receive(contract = "SettlementAuction", name = "claim", enable_logger)]
fn auction_claim<A: HasActions>(
    ctx: &impl HasReceiveContext,
    logger: &mut impl HasLogger,
    state: &mut State,
) -> ContractResult<A> {
    let settlement = claim(state, ctx.metadata().slot_time())?;

    logger.log(&CustomEvent::claim(state, &settlement))?;

    Ok(into_actions(settlement.dispatches, ctx.self_address()))
}

/// Send the highest bid and bidder to the given contract function.
#[receive(
    contract = "SettlementAuction",
    name = "viewHighestBid",
    parameter = "ViewParams"
)]
fn view_highest_bid<A: HasActions>(
    ctx: &impl HasReceiveContext,
    state: &mut State,
) -> ContractResult<A> {
    let params: ViewParams = ctx.parameter_cursor().get()?;
    Ok(params.respond(&state.get_highest_bid(ctx.self_address())))
}

/// Send the auction end time to the given contract function.
#[receive(
    contract = "SettlementAuction",
    name = "viewAuctionEndTime",
    parameter = "ViewParams"
)]
fn view_auction_end_time<A: HasActions>(
    ctx: &impl HasReceiveContext,
    state: &mut State,
) -> ContractResult<A> {
    let params: ViewParams = ctx.parameter_cursor().get()?;
    Ok(params.respond(&state.get_auction_end_time()))
}

#[receive(
    contract = "SettlementAuction",
    name = "viewAuctioneer",
    parameter = "ViewParams"
)]
fn view_auctioneer<A: HasActions>(
    ctx: &impl HasReceiveContext,
    state: &mut State,
) -> ContractResult<A> {
    let params: ViewParams = ctx.parameter_cursor().get()?;
    Ok(params.respond(&state.get_auctioneer()))
}

#[receive(
    contract = "SettlementAuction",
    name = "viewClaimed",
    parameter = "ViewParams"
)]
fn view_claimed<A: HasActions>(
    ctx: &impl HasReceiveContext,
    state: &mut State,
) -> ContractResult<A> {
    let params: ViewParams = ctx.parameter_cursor().get()?;
    Ok(params.respond(&state.get_claimed()))
}

/// Send a snapshot of the whole auction to the given contract function.
#[receive(
    contract = "SettlementAuction",
    name = "viewAuctionInfo",
    parameter = "ViewParams"
)]
fn view_auction_info<A: HasActions>(
    ctx: &impl HasReceiveContext,
    state: &mut State,
) -> ContractResult<A> {
    let params: ViewParams = ctx.parameter_cursor().get()?;
    Ok(params.respond(&state.get_auction_info(ctx.self_address())))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use test_infrastructure::*;

    const QUERIER: ContractAddress = ContractAddress {
        index: 9,
        subindex: 0,
    };

    fn init_ctx<'a>(parameter_bytes: &'a [u8]) -> InitContextTest<'a> {
        let mut ctx = InitContextTest::empty();
        ctx.set_parameter(parameter_bytes);
        ctx
    }

    fn new_ctx<'a>(sender: Address, slot_time: u64) -> ReceiveContextTest<'a> {
        let mut ctx = ReceiveContextTest::empty();
        ctx.set_sender(sender);
        ctx.set_owner(AUCTIONEER);
        ctx.set_self_address(INSTANCE);
        ctx.set_metadata_slot_time(time(slot_time));
        ctx
    }

    fn initial_state(parameter: &InitParameter) -> State {
        let parameter_bytes = to_bytes(parameter);
        auction_init(&init_ctx(&parameter_bytes)).expect_report("Initialization should pass")
    }

    fn bid_ccd(
        state: &mut State,
        bidder: AccountAddress,
        micro_ccd: u64,
        slot_time: u64,
    ) -> ContractResult<ActionsTree> {
        let ctx = new_ctx(Address::Account(bidder), slot_time);
        let mut logger = LogRecorder::init();
        auction_bid(&ctx, Amount::from_micro_ccd(micro_ccd), &mut logger, state)
    }

    fn deposit_prize(state: &mut State) -> ContractResult<ActionsTree> {
        let parameter = to_bytes(&deposit_of(
            prize_token().id,
            Address::Account(AUCTIONEER),
            1,
        ));
        let mut ctx = new_ctx(Address::Contract(NFT_CONTRACT), START);
        ctx.set_parameter(&parameter);
        let mut logger = LogRecorder::init();
        auction_on_receiving_cis1(&ctx, &mut logger, state)
    }

    fn view_params() -> ViewParams {
        ViewParams {
            result_contract: QUERIER,
            result_function: OwnedReceiveName::new_unchecked(String::from("Querier.answer")),
        }
    }

    fn answer<T: Serial>(response: &T) -> ActionsTree {
        send(
            &QUERIER,
            ReceiveName::new_unchecked("Querier.answer"),
            Amount::zero(),
            response,
        )
    }

    /// Test that the smart-contract initialization sets the state correctly
    /// (no bidder, starting bid, not claimed).
    #[concordium_test]
    fn test_init() {
        let state = initial_state(&ccd_parameter());

        claim_eq!(
            state,
            State {
                end_time: time(END),
                auctioneer: AUCTIONEER,
                bid_asset: BidAsset::Ccd,
                prize: Some(prize_token()),
                prize_held: false,
                highest_bidder: None,
                highest_bid: 0,
                claimed: false,
            },
            "Auction state should be new after initialization"
        );
    }

    #[concordium_test]
    fn test_init_malformed_parameter() {
        let ctx = init_ctx(&[1, 2, 3]);

        let result = auction_init(&ctx);

        claim!(result.is_err(), "Malformed parameter must be rejected");
    }

    /// Bids, claims and their transfers, once the auctioneer deposited the
    /// prize:
    /// 1. Alice bids 1 micro CCD. Nothing is refunded.
    /// 2. Bob bids 2 micro CCD. Alice gets 1 micro CCD back.
    /// 3. Carol bids 1 micro CCD. Bid is too low.
    /// 4. Claiming 30 seconds in fails, the auction is still running.
    /// 5. Claiming after the end pays the auctioneer and sends Bob the prize.
    /// 6. Claiming again fails.
    #[concordium_test]
    fn test_auction_bid_and_claim() {
        let mut state = initial_state(&ccd_parameter());
        deposit_prize(&mut state).expect_report("Prize deposit should pass");

        // 1.
        let ctx = new_ctx(Address::Account(ALICE), START);
        let mut logger = LogRecorder::init();
        let actions: ActionsTree =
            auction_bid(&ctx, Amount::from_micro_ccd(1), &mut logger, &mut state)
                .expect_report("Alice's bid should pass");
        claim_eq!(actions, ActionsTree::accept(), "No refund on the first bid");
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Bid(BidEvent {
                bidder: ALICE,
                amount: 1,
                displaced: None,
            }))],
            "Incorrect event emitted"
        );

        // 2.
        let ctx = new_ctx(Address::Account(BOB), START + 1);
        let mut logger = LogRecorder::init();
        let actions: ActionsTree =
            auction_bid(&ctx, Amount::from_micro_ccd(2), &mut logger, &mut state)
                .expect_report("Bob's bid should pass");
        claim_eq!(
            actions,
            independent(ActionsTree::simple_transfer(
                &ALICE,
                Amount::from_micro_ccd(1)
            )),
            "Alice should be refunded"
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Bid(BidEvent {
                bidder: BOB,
                amount: 2,
                displaced: Some(DisplacedBid {
                    account: ALICE,
                    amount: 1,
                }),
            }))]
        );

        // 3.
        let err =
            bid_ccd(&mut state, CAROL, 1, START + 2).expect_err_report("Bid should be too low");
        claim_eq!(err, ContractError::from(CustomContractError::BidTooLow));
        claim_eq!(state.get_highest_bid(INSTANCE).bidder, Address::Account(BOB));
        claim_eq!(state.highest_bid, 2);

        // 4.
        let ctx = new_ctx(Address::Account(AUCTIONEER), START + 30_000);
        let mut logger = LogRecorder::init();
        let result: ContractResult<ActionsTree> = auction_claim(&ctx, &mut logger, &mut state);
        claim_eq!(
            result.expect_err_report("Claim should fail while running"),
            ContractError::from(CustomContractError::AuctionNotEnded)
        );

        // 5.
        let ctx = new_ctx(Address::Account(AUCTIONEER), END + 1_000);
        let mut logger = LogRecorder::init();
        let actions: ActionsTree = auction_claim(&ctx, &mut logger, &mut state)
            .expect_report("Claim should pass after the end");
        claim_eq!(
            actions,
            independent(ActionsTree::simple_transfer(
                &AUCTIONEER,
                Amount::from_micro_ccd(2)
            ))
            .and_then(independent(token_transfer(&prize_token(), 1, BOB)))
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Claim(ClaimEvent {
                auctioneer: AUCTIONEER,
                winner: Some(BOB),
                price: 2,
                prize: Some(prize_token()),
            }))]
        );
        claim!(state.claimed, "Auction should be claimed");

        // 6.
        let ctx = new_ctx(Address::Account(AUCTIONEER), END + 2_000);
        let mut logger = LogRecorder::init();
        let result: ContractResult<ActionsTree> = auction_claim(&ctx, &mut logger, &mut state);
        claim_eq!(
            result.expect_err_report("Second claim should fail"),
            ContractError::from(CustomContractError::AlreadyClaimed)
        );
        claim!(logger.logs.is_empty(), "Failed claims log nothing");
    }

    #[concordium_test]
    fn test_bid_after_end() {
        let mut state = initial_state(&ccd_parameter());

        let err = bid_ccd(&mut state, ALICE, 10, END).expect_err_report("Auction is over");

        claim_eq!(err, ContractError::from(CustomContractError::AuctionEnded));
    }

    #[concordium_test]
    fn test_first_bid_of_one_micro_ccd() {
        let mut state = initial_state(&ccd_parameter());

        let actions = bid_ccd(&mut state, ALICE, 1, START)
            .expect_report("The smallest positive bid opens the auction");

        claim_eq!(actions, ActionsTree::accept());
        claim_eq!(
            state.get_highest_bid(INSTANCE),
            HighestBid {
                bidder: Address::Account(ALICE),
                bid: 1,
            }
        );
    }

    #[concordium_test]
    fn test_bid_of_zero_is_too_low() {
        let mut state = initial_state(&ccd_parameter());

        let err = bid_ccd(&mut state, ALICE, 0, START).expect_err_report("Zero is no bid");

        claim_eq!(err, ContractError::from(CustomContractError::BidTooLow));
        claim_eq!(state.highest_bidder, None);
    }

    /// The auctioneer deposits the prize NFT, Alice wins it with bid tokens
    /// and the claim sends the tokens to the auctioneer and the NFT to Alice.
    #[concordium_test]
    fn test_deposited_prize_reaches_winner() {
        let mut state = initial_state(&token_parameter());
        let prize = to_bytes(&deposit_of(
            prize_token().id,
            Address::Account(AUCTIONEER),
            1,
        ));
        let deposit = to_bytes(&deposit_of(bid_token().id, Address::Account(ALICE), 15_000));

        let mut ctx = new_ctx(Address::Contract(NFT_CONTRACT), START);
        ctx.set_parameter(&prize);
        let mut logger = LogRecorder::init();
        let actions: ActionsTree = auction_on_receiving_cis1(&ctx, &mut logger, &mut state)
            .expect_report("Prize deposit should pass");
        claim_eq!(actions, ActionsTree::accept(), "Holding the prize moves nothing");
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Prize(PrizeEvent {
                from: AUCTIONEER,
                prize: prize_token(),
            }))]
        );
        claim_eq!(state.highest_bidder, None, "The prize is not a bid");

        let result = deposit_prize(&mut state);
        claim_eq!(
            result.expect_err_report("The prize is deposited once"),
            ContractError::from(CustomContractError::InvalidPrizeDeposit)
        );

        let mut ctx = new_ctx(Address::Contract(TOKEN_CONTRACT), START + 1);
        ctx.set_parameter(&deposit);
        let mut logger = LogRecorder::init();
        let _: ActionsTree = auction_on_receiving_cis1(&ctx, &mut logger, &mut state)
            .expect_report("Alice's deposit should pass");

        let ctx = new_ctx(Address::Account(CAROL), END + 1);
        let mut logger = LogRecorder::init();
        let actions: ActionsTree = auction_claim(&ctx, &mut logger, &mut state)
            .expect_report("Claim should pass");

        claim_eq!(
            actions,
            independent(token_transfer(&bid_token(), 15_000, AUCTIONEER))
                .and_then(independent(token_transfer(&prize_token(), 1, ALICE))),
            "A failing transfer must neither undo the claim nor block the other"
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Claim(ClaimEvent {
                auctioneer: AUCTIONEER,
                winner: Some(ALICE),
                price: 15_000,
                prize: Some(prize_token()),
            }))]
        );
        claim!(state.claimed);

        let result = deposit_prize(&mut state);
        claim_eq!(
            result.expect_err_report("Claimed auctions take no prize"),
            ContractError::from(CustomContractError::AlreadyClaimed)
        );
    }

    #[concordium_test]
    fn test_token_bid_through_hook() {
        let mut state = initial_state(&token_parameter());
        let mut logger = LogRecorder::init();
        let first = to_bytes(&deposit_of(bid_token().id, Address::Account(ALICE), 20_000));
        let second = to_bytes(&deposit_of(bid_token().id, Address::Account(BOB), 30_000));

        let mut ctx = new_ctx(Address::Contract(TOKEN_CONTRACT), START);
        ctx.set_parameter(&first);
        let actions: ActionsTree = auction_on_receiving_cis1(&ctx, &mut logger, &mut state)
            .expect_report("Alice's deposit should be accepted");
        claim_eq!(actions, ActionsTree::accept());

        ctx.set_parameter(&second);
        let actions: ActionsTree = auction_on_receiving_cis1(&ctx, &mut logger, &mut state)
            .expect_report("Bob's deposit should be accepted");

        claim_eq!(
            actions,
            independent(token_transfer(&bid_token(), 20_000, ALICE)),
            "Alice should be refunded in tokens"
        );
        claim_eq!(logger.logs.len(), 2, "One event per accepted deposit");
        claim_eq!(state.highest_bidder, Some(BOB));
        claim_eq!(state.highest_bid, 30_000);
    }

    #[concordium_test]
    fn test_hook_rejects_foreign_token() {
        let mut state = initial_state(&token_parameter());
        let mut logger = LogRecorder::init();
        let parameter = to_bytes(&deposit_of(bid_token().id, Address::Account(ALICE), 20_000));

        let mut ctx = new_ctx(Address::Contract(NFT_CONTRACT), START);
        ctx.set_parameter(&parameter);
        let result: ContractResult<ActionsTree> =
            auction_on_receiving_cis1(&ctx, &mut logger, &mut state);

        claim_eq!(
            result.expect_err_report("Foreign token must be refused"),
            ContractError::from(CustomContractError::UnsupportedAsset)
        );
        claim_eq!(state.highest_bidder, None);
    }

    #[concordium_test]
    fn test_views() {
        let mut state = initial_state(&ccd_parameter());
        let parameter = to_bytes(&view_params());
        let mut ctx = new_ctx(Address::Contract(QUERIER), START);
        ctx.set_parameter(&parameter);

        let actions: ActionsTree =
            view_highest_bid(&ctx, &mut state).expect_report("View should pass");
        claim_eq!(
            actions,
            answer(&HighestBid {
                bidder: Address::Contract(INSTANCE),
                bid: 0,
            })
        );

        let actions: ActionsTree =
            view_auction_end_time(&ctx, &mut state).expect_report("View should pass");
        claim_eq!(actions, answer(&time(END)));

        let actions: ActionsTree =
            view_auctioneer(&ctx, &mut state).expect_report("View should pass");
        claim_eq!(actions, answer(&AUCTIONEER));

        let actions: ActionsTree =
            view_claimed(&ctx, &mut state).expect_report("View should pass");
        claim_eq!(actions, answer(&false));

        bid_ccd(&mut state, ALICE, 5, START).expect_report("Alice's bid should pass");
        let actions: ActionsTree =
            view_auction_info(&ctx, &mut state).expect_report("View should pass");
        claim_eq!(actions, answer(&state.get_auction_info(INSTANCE)));
    }
}
