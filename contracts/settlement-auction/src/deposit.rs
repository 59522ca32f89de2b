use super::*;

/// Tells the token contract how much of a deposit the auction did not keep.
/// `unused == 0` means the whole deposit was kept.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone, Copy)]
pub struct DepositReceipt {
    pub unused: TokenAmount,
}

impl DepositReceipt {
    pub fn kept_all() -> Self {
        Self { unused: 0 }
    }

    pub fn returned(amount: TokenAmount) -> Self {
        Self { unused: amount }
    }
}

/// The prize entering the custody of the instance.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PrizeDeposit {
    pub from: AccountAddress,
    pub prize: Token,
}

/// What an accepted deposit was used for.
#[derive(Debug, PartialEq, Eq)]
pub enum Deposited {
    /// Deposit of the bid token, now the highest bid.
    Bid(AcceptedBid),
    /// The prize token, held until the auction is claimed.
    Prize(PrizeDeposit),
}

/// Deposit the auction kept.
#[derive(Debug, PartialEq, Eq)]
pub struct AcceptedDeposit {
    pub receipt: DepositReceipt,
    pub deposited: Deposited,
}

/// Deposit the auction refused. The receipt hands the full amount back so the
/// token contract can restore the sender's balance.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DepositRejection {
    pub error: CustomContractError,
    pub receipt: DepositReceipt,
}

/// Handle a CIS1 deposit notification.
///
/// The immediate `caller` must be the contract of the configured prize or of
/// the configured bid token, and the deposit must be of that token id. The
/// depositor and the amount are taken from the notification: the caller
/// vouches for whose deposit it is. `data` is a free-form memo and is ignored.
///
/// A prize deposit is rejected if:
/// - The auction was already claimed.
/// - The prize is already held, or the amount is not exactly one.
/// - The deposit comes from a contract.
///
/// A bid deposit is rejected if:
/// - The auction takes its bids in CCD.
/// - The caller or the token id is not the configured bid token.
/// - The deposit comes from a contract.
/// - The auction has ended.
/// - The deposit does not exceed the highest bid.
pub fn on_deposit_notification(
    state: &mut State,
    now: Timestamp,
    caller: Address,
    notification: &OnReceivingCis1Params<ContractTokenId>,
) -> Result<AcceptedDeposit, DepositRejection> {
    let deposited = match state.prize.clone() {
        Some(prize) if prize.is_notified_by(&caller, &notification.token_id) => {
            admit_prize(state, prize, notification).map(Deposited::Prize)
        }
        _ => admit_deposit(state, now, caller, notification).map(Deposited::Bid),
    };

    deposited
        .map(|deposited| AcceptedDeposit {
            receipt: DepositReceipt::kept_all(),
            deposited,
        })
        .map_err(|error| DepositRejection {
            error,
            receipt: DepositReceipt::returned(notification.amount),
        })
}

fn admit_prize(
    state: &mut State,
    prize: Token,
    notification: &OnReceivingCis1Params<ContractTokenId>,
) -> Result<PrizeDeposit, CustomContractError> {
    ensure!(!state.claimed, CustomContractError::AlreadyClaimed);
    ensure!(
        !state.prize_held && notification.amount == NFT_AMOUNT,
        CustomContractError::InvalidPrizeDeposit
    );

    let from = match notification.from {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    };

    state.prize_held = true;

    Ok(PrizeDeposit { from, prize })
}

fn admit_deposit(
    state: &mut State,
    now: Timestamp,
    caller: Address,
    notification: &OnReceivingCis1Params<ContractTokenId>,
) -> Result<AcceptedBid, CustomContractError> {
    let supported = match &state.bid_asset {
        BidAsset::Token(token) => token.is_notified_by(&caller, &notification.token_id),
        BidAsset::Ccd => false,
    };
    ensure!(supported, CustomContractError::UnsupportedAsset);

    let bidder = match notification.from {
        Address::Account(account) => account,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    };

    accept_bid(state, now, bidder, notification.amount)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn deposit(from: AccountAddress, amount: TokenAmount) -> OnReceivingCis1Params<ContractTokenId> {
        deposit_of(bid_token().id, Address::Account(from), amount)
    }

    #[concordium_test]
    fn test_first_deposit_is_kept() {
        let mut state = State::new(token_parameter());

        let accepted = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(ALICE, 10_001),
        )
        .expect_report("Deposit should be accepted");

        claim_eq!(accepted.receipt, DepositReceipt { unused: 0 });
        claim_eq!(
            accepted.deposited,
            Deposited::Bid(AcceptedBid {
                bidder: ALICE,
                amount: 10_001,
                displaced: None,
                dispatches: Vec::new(),
            }),
            "Nothing to refund yet"
        );
        claim_eq!(state.highest_bidder, Some(ALICE));
        claim_eq!(state.highest_bid, 10_001);
    }

    #[concordium_test]
    fn test_outbid_deposit_refunds_in_tokens() {
        let mut state = State::new(token_parameter());
        on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(ALICE, 50_000),
        )
        .expect_report("Alice's deposit should be accepted");

        let accepted = on_deposit_notification(
            &mut state,
            time(START + 10),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(BOB, 60_000),
        )
        .expect_report("Bob's deposit should be accepted");

        claim_eq!(
            accepted.deposited,
            Deposited::Bid(AcceptedBid {
                bidder: BOB,
                amount: 60_000,
                displaced: Some(DisplacedBid {
                    account: ALICE,
                    amount: 50_000,
                }),
                dispatches: vec![Dispatch::Token {
                    token: bid_token(),
                    amount: 50_000,
                    to: ALICE,
                }],
            })
        );
        claim_eq!(state.highest_bidder, Some(BOB));
    }

    #[concordium_test]
    fn test_foreign_caller_gets_everything_back() {
        let mut state = State::new(token_parameter());

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &deposit(ALICE, 50_000),
        )
        .expect_err_report("Deposit from another contract must be refused");

        claim_eq!(
            rejection,
            DepositRejection {
                error: CustomContractError::UnsupportedAsset,
                receipt: DepositReceipt { unused: 50_000 },
            }
        );
        claim_eq!(state.highest_bidder, None);
    }

    #[concordium_test]
    fn test_account_posing_as_token_is_refused() {
        let mut state = State::new(token_parameter());

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Account(ALICE),
            &deposit(ALICE, 50_000),
        )
        .expect_err_report("Only the token contract may notify deposits");

        claim_eq!(rejection.error, CustomContractError::UnsupportedAsset);
        claim_eq!(rejection.receipt.unused, 50_000);
    }

    #[concordium_test]
    fn test_other_token_id_is_refused() {
        let mut state = State::new(token_parameter());

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit_of(TokenIdVec(vec![9, 9]), Address::Account(ALICE), 50_000),
        )
        .expect_err_report("Deposit of another token id must be refused");

        claim_eq!(rejection.error, CustomContractError::UnsupportedAsset);
        claim_eq!(rejection.receipt.unused, 50_000);
    }

    #[concordium_test]
    fn test_deposit_on_ccd_auction_is_refused() {
        let mut state = State::new(ccd_parameter());

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(ALICE, 50_000),
        )
        .expect_err_report("CCD auctions do not take token deposits");

        claim_eq!(rejection.error, CustomContractError::UnsupportedAsset);
    }

    #[concordium_test]
    fn test_deposit_from_contract_is_refused() {
        let mut state = State::new(token_parameter());

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit_of(bid_token().id, Address::Contract(NFT_CONTRACT), 50_000),
        )
        .expect_err_report("Contracts cannot bid");

        claim_eq!(rejection.error, CustomContractError::OnlyAccountAddress);
        claim_eq!(rejection.receipt.unused, 50_000);
    }

    #[concordium_test]
    fn test_low_and_late_deposits_are_returned() {
        let mut state = State::new(token_parameter());
        on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(ALICE, 50_000),
        )
        .expect_report("Alice's deposit should be accepted");

        let low = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(BOB, 50_000),
        );
        claim_eq!(
            low,
            Err(DepositRejection {
                error: CustomContractError::BidTooLow,
                receipt: DepositReceipt { unused: 50_000 },
            })
        );

        let late = on_deposit_notification(
            &mut state,
            time(END),
            Address::Contract(TOKEN_CONTRACT),
            &deposit(BOB, 90_000),
        );
        claim_eq!(
            late,
            Err(DepositRejection {
                error: CustomContractError::AuctionEnded,
                receipt: DepositReceipt { unused: 90_000 },
            })
        );

        claim_eq!(state.highest_bidder, Some(ALICE));
        claim_eq!(state.highest_bid, 50_000);
    }

    fn prize_deposit(from: Address, amount: TokenAmount) -> OnReceivingCis1Params<ContractTokenId> {
        deposit_of(prize_token().id, from, amount)
    }

    #[concordium_test]
    fn test_prize_deposit_is_held() {
        let mut state = State::new(ccd_parameter());

        let accepted = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 1),
        )
        .expect_report("Prize deposit should be accepted");

        claim_eq!(accepted.receipt, DepositReceipt::kept_all());
        claim_eq!(
            accepted.deposited,
            Deposited::Prize(PrizeDeposit {
                from: AUCTIONEER,
                prize: prize_token(),
            })
        );
        claim_eq!(state.held_prize(), Some(&prize_token()));
        claim_eq!(state.highest_bidder, None, "A prize deposit is not a bid");
        claim_eq!(state.highest_bid, DEFAULT_STARTING_BID);
    }

    #[concordium_test]
    fn test_prize_deposit_after_end_is_held() {
        let mut state = State::new(token_parameter());

        on_deposit_notification(
            &mut state,
            time(END + 1),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 1),
        )
        .expect_report("The prize may arrive until the auction is claimed");

        claim!(state.prize_held);
    }

    #[concordium_test]
    fn test_invalid_prize_deposits_are_returned() {
        let mut state = State::new(ccd_parameter());

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 2),
        )
        .expect_err_report("More than one unit must be refused");
        claim_eq!(
            rejection,
            DepositRejection {
                error: CustomContractError::InvalidPrizeDeposit,
                receipt: DepositReceipt { unused: 2 },
            }
        );

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Contract(TOKEN_CONTRACT), 1),
        )
        .expect_err_report("Contracts cannot deposit the prize");
        claim_eq!(rejection.error, CustomContractError::OnlyAccountAddress);
        claim!(!state.prize_held);

        on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 1),
        )
        .expect_report("Prize deposit should be accepted");
        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 1),
        )
        .expect_err_report("The prize is held once");
        claim_eq!(rejection.error, CustomContractError::InvalidPrizeDeposit);
        claim_eq!(rejection.receipt.unused, 1);
    }

    #[concordium_test]
    fn test_prize_deposit_after_claim_is_refused() {
        let mut state = State::new(ccd_parameter());
        state.claimed = true;

        let rejection = on_deposit_notification(
            &mut state,
            time(END + 1),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 1),
        )
        .expect_err_report("Claimed auctions take no prize");

        claim_eq!(rejection.error, CustomContractError::AlreadyClaimed);
        claim!(!state.prize_held);
    }

    #[concordium_test]
    fn test_prize_token_without_prize_is_refused() {
        let mut parameter = token_parameter();
        parameter.prize = None;
        let mut state = State::new(parameter);

        let rejection = on_deposit_notification(
            &mut state,
            time(START),
            Address::Contract(NFT_CONTRACT),
            &prize_deposit(Address::Account(AUCTIONEER), 1),
        )
        .expect_err_report("No prize is configured");

        claim_eq!(rejection.error, CustomContractError::UnsupportedAsset);
    }
}
