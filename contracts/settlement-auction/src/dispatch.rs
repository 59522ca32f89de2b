use super::*;

/// A one-way transfer request. It is handed to the chain as an action once
/// the call returns; nothing about its outcome comes back to the contract.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Dispatch {
    /// Plain CCD transfer.
    Ccd { to: AccountAddress, amount: Amount },
    /// CIS1 `transfer` of `amount` units of `token` from this instance.
    Token {
        token: Token,
        amount: TokenAmount,
        to: AccountAddress,
    },
}

impl Dispatch {
    /// Move `amount` of the auction's bid asset to `to`.
    pub fn bid_asset(asset: &BidAsset, to: AccountAddress, amount: BidAmount) -> Self {
        match asset {
            BidAsset::Ccd => Self::Ccd {
                to,
                amount: Amount::from_micro_ccd(amount),
            },
            BidAsset::Token(token) => Self::Token {
                token: token.clone(),
                amount,
                to,
            },
        }
    }

    /// Hand the prize token over to `to`.
    pub fn prize(token: &Token, to: AccountAddress) -> Self {
        Self::Token {
            token: token.clone(),
            amount: NFT_AMOUNT,
            to,
        }
    }

    pub fn into_action<A: HasActions>(self, instance: ContractAddress) -> A {
        match self {
            Self::Ccd { to, amount } => A::simple_transfer(&to, amount),
            Self::Token { token, amount, to } => {
                let parameter = token.transfer_params(amount, Address::Contract(instance), to);
                send(
                    &token.contract,
                    token.transfer.as_ref(),
                    Amount::zero(),
                    &parameter,
                )
            }
        }
    }
}

/// Chain `dispatches` in order into the actions returned to the host. Each
/// dispatch is issued exactly once and falls back to `accept` on failure, so
/// a failing transfer neither reverts the call nor skips the ones after it.
pub fn into_actions<A: HasActions>(dispatches: Vec<Dispatch>, instance: ContractAddress) -> A {
    let mut actions = dispatches
        .into_iter()
        .map(|dispatch| dispatch.into_action::<A>(instance).or_else(A::accept()));
    match actions.next() {
        Some(first) => actions.fold(first, |chain, action| chain.and_then(action)),
        None => A::accept(),
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use test_infrastructure::*;

    #[concordium_test]
    fn test_no_dispatches_accept() {
        let actions: ActionsTree = into_actions(Vec::new(), INSTANCE);

        claim_eq!(actions, ActionsTree::accept(), "No action should be produced");
    }

    #[concordium_test]
    fn test_ccd_dispatch() {
        let dispatch = Dispatch::bid_asset(&BidAsset::Ccd, ALICE, 100);
        claim_eq!(
            dispatch,
            Dispatch::Ccd {
                to: ALICE,
                amount: Amount::from_micro_ccd(100),
            }
        );

        let actions: ActionsTree = into_actions(vec![dispatch], INSTANCE);
        claim_eq!(
            actions,
            ActionsTree::simple_transfer(&ALICE, Amount::from_micro_ccd(100))
                .or_else(ActionsTree::accept())
        );
    }

    #[concordium_test]
    fn test_token_dispatches_are_chained_in_order() {
        let payout = Dispatch::bid_asset(&BidAsset::Token(bid_token()), AUCTIONEER, 20);
        let prize = Dispatch::prize(&prize_token(), BOB);

        let actions: ActionsTree = into_actions(vec![payout, prize], INSTANCE);

        claim_eq!(
            actions,
            independent(token_transfer(&bid_token(), 20, AUCTIONEER))
                .and_then(independent(token_transfer(&prize_token(), 1, BOB)))
        );
    }

    #[concordium_test]
    fn test_failed_transfer_does_not_stop_the_next() {
        let actions: ActionsTree = into_actions(
            vec![
                Dispatch::bid_asset(&BidAsset::Ccd, AUCTIONEER, 2),
                Dispatch::prize(&prize_token(), BOB),
            ],
            INSTANCE,
        );

        let payout = ActionsTree::simple_transfer(&AUCTIONEER, Amount::from_micro_ccd(2));
        let prize = token_transfer(&prize_token(), 1, BOB);
        claim_eq!(
            actions,
            payout
                .or_else(ActionsTree::accept())
                .and_then(prize.or_else(ActionsTree::accept())),
            "Each transfer must fall back to accept on its own"
        );
    }
}
