use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type. Token ids in this suite are small integers, so
/// a `u32` representation is enough.
pub type ContractTokenId = TokenIdU32;

/// A token either exists with a single owner or does not, so token amounts
/// fit in a `u8`.
pub type ContractTokenAmount = TokenAmountU8;

/// Wrapping the custom errors in a type with CIS-2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the
/// token ids used by this suite.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;

/// Reference to a token: the registry contract that minted it and its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct Token {
    pub contract: ContractAddress,
    pub id: ContractTokenId,
}
