use super::*;

/// The registry state: one owner per minted token and address-scoped
/// operator approvals.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Owner of every minted token.
    pub tokens: StateMap<ContractTokenId, Address, S>,
    /// Addresses allowed to move tokens on behalf of an owner.
    pub operators: StateMap<Address, StateSet<Address, S>, S>,
}

impl<S: HasStateApi> State<S> {
    /// Create a registry with no tokens.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        State {
            tokens: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    /// Mint a fresh token owned by `owner`. Fails if the id is taken.
    pub fn mint(&mut self, token_id: ContractTokenId, owner: Address) -> ContractResult<()> {
        ensure!(
            self.tokens.get(&token_id).is_none(),
            CustomContractError::TokenIdAlreadyExists.into()
        );
        self.tokens.insert(token_id, owner);
        Ok(())
    }

    /// Current owner of a token.
    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.tokens
            .get(token_id)
            .map(|owner| *owner)
            .ok_or(ContractError::InvalidTokenId)
    }

    /// CIS-2 balance: 1 for the owner of an existing token, 0 otherwise.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let owner = self.owner_of(token_id)?;
        Ok(if owner == *address { 1.into() } else { 0.into() })
    }

    /// Check whether `address` is an operator of `owner`.
    pub fn is_operator(&self, address: &Address, owner: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|set| set.contains(address))
            .unwrap_or(false)
    }

    /// Move a token between addresses. The caller must have authenticated
    /// the sender beforehand.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        from: &Address,
        to: &Address,
    ) -> ContractResult<()> {
        let owner = self.owner_of(token_id)?;
        // A zero transfer only requires the token to exist.
        if amount.0 == 0 {
            return Ok(());
        }
        ensure!(amount.0 == 1, ContractError::InsufficientFunds);
        ensure!(owner == *from, ContractError::InsufficientFunds);
        self.tokens.insert(*token_id, *to);
        Ok(())
    }

    /// Register `operator` for all tokens owned by `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        let mut set = self
            .operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set());
        set.insert(*operator);
    }

    /// Drop `operator` for all tokens owned by `owner`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        if let Some(mut set) = self.operators.get_mut(owner) {
            set.remove(operator);
        }
    }
}
