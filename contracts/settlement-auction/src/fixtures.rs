//! Accounts, tokens and parameters shared by the unit tests.
use super::*;
use test_infrastructure::*;

/// Slot time the tests start bidding at, in milliseconds.
pub const START: u64 = 1_000;
/// Auction end, one minute after `START`.
pub const END: u64 = START + 60_000;

pub const AUCTIONEER: AccountAddress = AccountAddress([0u8; 32]);
pub const ALICE: AccountAddress = AccountAddress([1u8; 32]);
pub const BOB: AccountAddress = AccountAddress([2u8; 32]);
pub const CAROL: AccountAddress = AccountAddress([3u8; 32]);

pub const INSTANCE: ContractAddress = ContractAddress {
    index: 1,
    subindex: 0,
};
pub const TOKEN_CONTRACT: ContractAddress = ContractAddress {
    index: 2,
    subindex: 0,
};
pub const NFT_CONTRACT: ContractAddress = ContractAddress {
    index: 3,
    subindex: 0,
};

pub fn time(millis: u64) -> Timestamp {
    Timestamp::from_timestamp_millis(millis)
}

/// Fungible token bids are placed in.
pub fn bid_token() -> Token {
    Token {
        contract: TOKEN_CONTRACT,
        id: TokenIdVec(Vec::new()),
        transfer: OwnedReceiveName::new_unchecked(String::from("BidToken.transfer")),
    }
}

/// Non-fungible token the winner receives.
pub fn prize_token() -> Token {
    Token {
        contract: NFT_CONTRACT,
        id: TokenIdVec(vec![0, 1]),
        transfer: OwnedReceiveName::new_unchecked(String::from("PrizeNFT.transfer")),
    }
}

/// CCD auction with a prize.
pub fn ccd_parameter() -> InitParameter {
    InitParameter {
        end_time: time(END),
        auctioneer: AUCTIONEER,
        bid_asset: BidAsset::Ccd,
        prize: Some(prize_token()),
        starting_bid: None,
    }
}

/// Token auction with a prize and a starting bid of 10 000 units.
pub fn token_parameter() -> InitParameter {
    InitParameter {
        end_time: time(END),
        auctioneer: AUCTIONEER,
        bid_asset: BidAsset::Token(bid_token()),
        prize: Some(prize_token()),
        starting_bid: Some(10_000),
    }
}

/// What a CIS1 contract sends to `onReceivingCIS1` on a transfer.
pub fn deposit_of(
    token_id: ContractTokenId,
    from: Address,
    amount: TokenAmount,
) -> OnReceivingCis1Params<ContractTokenId> {
    OnReceivingCis1Params {
        token_id,
        amount,
        from,
        contract_name: OwnedContractName::new_unchecked(String::from("init_BidToken")),
        data: AdditionalData::empty(),
    }
}

/// CIS1 `transfer` of `amount` units of `token` from the instance to `to`.
pub fn token_transfer(token: &Token, amount: TokenAmount, to: AccountAddress) -> ActionsTree {
    send(
        &token.contract,
        token.transfer.as_ref(),
        Amount::zero(),
        &TransferParams(vec![Transfer {
            token_id: token.id.clone(),
            amount,
            from: Address::Contract(INSTANCE),
            to: Receiver::Account(to),
            data: AdditionalData::empty(),
        }]),
    )
}

/// `action`, allowed to fail without reverting the call.
pub fn independent(action: ActionsTree) -> ActionsTree {
    action.or_else(ActionsTree::accept())
}
