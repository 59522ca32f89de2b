use super::*;

/// A CIS1 token together with the entrypoint that moves it.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone)]
pub struct Token {
    pub contract: ContractAddress,
    pub id: ContractTokenId,
    /// The `transfer` entrypoint of `contract`, e.g. `BictoryNFT.transfer`.
    pub transfer: OwnedReceiveName,
}

impl Token {
    /// Whether `sender` is the contract that issues this token.
    pub fn is_issued_by(&self, sender: &Address) -> bool {
        matches!(sender, Address::Contract(contract) if *contract == self.contract)
    }

    /// Whether a CIS1 hook call from `sender` about `token_id` is about this token.
    pub fn is_notified_by(&self, sender: &Address, token_id: &ContractTokenId) -> bool {
        self.is_issued_by(sender) && self.id == *token_id
    }

    /// Parameter for a single CIS1 transfer of `amount` units to account `to`.
    pub fn transfer_params(
        &self,
        amount: TokenAmount,
        from: Address,
        to: AccountAddress,
    ) -> TransferParams<ContractTokenId> {
        TransferParams(vec![Transfer {
            token_id: self.id.clone(),
            amount,
            from,
            to: Receiver::Account(to),
            data: AdditionalData::empty(),
        }])
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const NFT: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };

    fn token() -> Token {
        Token {
            contract: NFT,
            id: TokenIdVec(vec![1]),
            transfer: OwnedReceiveName::new_unchecked(String::from("BictoryNFT.transfer")),
        }
    }

    #[concordium_test]
    fn test_is_issued_by() {
        let token = token();
        claim!(token.is_issued_by(&Address::Contract(NFT)));
        claim!(!token.is_issued_by(&Address::Contract(ContractAddress {
            index: 8,
            subindex: 0,
        })));
        claim!(!token.is_issued_by(&Address::Account(AccountAddress([7u8; 32]))));
    }

    #[concordium_test]
    fn test_is_notified_by() {
        let token = token();
        claim!(token.is_notified_by(&Address::Contract(NFT), &TokenIdVec(vec![1])));
        claim!(!token.is_notified_by(&Address::Contract(NFT), &TokenIdVec(vec![2])));
        claim!(!token.is_notified_by(
            &Address::Account(AccountAddress([7u8; 32])),
            &TokenIdVec(vec![1])
        ));
    }
}
