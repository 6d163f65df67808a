//! Token metadata, off-chain document and on-chain record

use mpl_token_metadata::{
    instructions::{CreateMetadataAccountV3, CreateMetadataAccountV3InstructionArgs},
    types::DataV2,
};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};

use crate::core::TokenMetadataDocument;

impl TokenMetadataDocument {
    /// Build the JSON document pinned next to the token image
    pub fn new(name: &str, symbol: &str, image_url: &str, service_name: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            description: format!("{} - Created via {}", name, service_name),
            image: image_url.to_string(),
        }
    }
}

/// Derive metadata PDA for SPL tokens
pub fn derive_metadata(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            b"metadata",
            mpl_token_metadata::ID.as_ref(),
            mint.as_ref(),
        ],
        &mpl_token_metadata::ID,
    )
}

/// Metadata record with no royalties, creators, collection or uses
pub fn token_data(name: &str, symbol: &str, uri: &str) -> DataV2 {
    DataV2 {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    }
}

/// `CreateMetadataAccountV3` with `authority` as mint authority, payer and update authority
pub fn create_metadata_instruction(
    mint: &Pubkey,
    authority: &Pubkey,
    data: DataV2,
    is_mutable: bool,
) -> Instruction {
    let (metadata, _) = derive_metadata(mint);

    CreateMetadataAccountV3 {
        metadata,
        mint: *mint,
        mint_authority: *authority,
        payer: *authority,
        update_authority: (*authority, true),
        system_program: system_program::ID,
        rent: None,
    }
    .instruction(CreateMetadataAccountV3InstructionArgs {
        data,
        is_mutable,
        collection_details: None,
    })
}
