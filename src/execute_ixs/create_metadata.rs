use mpl_token_metadata::{
    accounts::Metadata,
    instructions::{CreateMetadataAccountV3, CreateMetadataAccountV3InstructionArgs},
    types::DataV2,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_program,
};
use tracing::info;

use crate::error::Result;
use crate::execute_ixs::send_instructions;

/// Metadata account address for `mint`: `["metadata", program_id, mint]`.
pub fn metadata_pda(mint: &Pubkey) -> Pubkey {
    Metadata::find_pda(mint).0
}

pub fn build_create_metadata_instruction(
    mint: &Pubkey,
    authority: &Pubkey,
    data: DataV2,
) -> Instruction {
    CreateMetadataAccountV3 {
        metadata: metadata_pda(mint),
        mint: *mint,
        mint_authority: *authority,
        payer: *authority,
        update_authority: (*authority, true),
        system_program: system_program::id(),
        rent: None,
    }
    .instruction(CreateMetadataAccountV3InstructionArgs {
        data,
        is_mutable: true,
        collection_details: None,
    })
}

/// Creates the metadata account in its own transaction, returning the account
/// address and the transaction signature.
pub async fn create_metadata(
    rpc_client: &RpcClient,
    payer: &Keypair,
    mint: &Pubkey,
    data: DataV2,
) -> Result<(Pubkey, Signature)> {
    let metadata = metadata_pda(mint);
    let instruction = build_create_metadata_instruction(mint, &payer.pubkey(), data);

    let signature = send_instructions(rpc_client, payer, &[], &[instruction]).await?;

    info!(%metadata, %signature, "Metadata account created");
    Ok((metadata, signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR: u8 = 33;

    fn data() -> DataV2 {
        DataV2 {
            name: "CASTLE".to_string(),
            symbol: "CST".to_string(),
            uri: "https://gateway/ipfs/meta".to_string(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        }
    }

    #[test]
    fn pda_uses_metadata_seeds() {
        let mint = Pubkey::new_unique();
        let (expected, _) = Pubkey::find_program_address(
            &[b"metadata", mpl_token_metadata::ID.as_ref(), mint.as_ref()],
            &mpl_token_metadata::ID,
        );

        assert_eq!(metadata_pda(&mint), expected);
    }

    #[test]
    fn instruction_targets_metadata_program_with_payer_authorities() {
        let mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();

        let ix = build_create_metadata_instruction(&mint, &payer, data());

        assert_eq!(ix.program_id, mpl_token_metadata::ID);
        assert_eq!(ix.data[0], CREATE_METADATA_ACCOUNT_V3_DISCRIMINATOR);

        let metadata = &ix.accounts[0];
        assert_eq!(metadata.pubkey, metadata_pda(&mint));
        assert!(metadata.is_writable);

        assert_eq!(ix.accounts[1].pubkey, mint);
        assert!(!ix.accounts[1].is_signer);

        for account in &ix.accounts[2..5] {
            assert_eq!(account.pubkey, payer);
            assert!(account.is_signer);
        }
        assert_eq!(ix.accounts[5].pubkey, system_program::id());
    }

    #[test]
    fn instruction_data_embeds_name_symbol_and_uri() {
        let ix = build_create_metadata_instruction(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            data(),
        );

        let contains = |needle: &[u8]| ix.data.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"CASTLE"));
        assert!(contains(b"CST"));
        assert!(contains(b"https://gateway/ipfs/meta"));
    }
}
