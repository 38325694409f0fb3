use alloy_primitives::BlockHash;
use tracing::debug;

use crate::{BlockRecord, BlockTransactionsKind, ChainProvider, ChangeError};

/// Fetches the block by hash and checks that the transaction under test is alone in it.
///
/// Only transaction hashes are requested; the block body is never needed.
pub(crate) async fn fetch_single_tx_block<P>(
    provider: &P,
    block_hash: BlockHash,
) -> Result<BlockRecord, ChangeError>
where
    P: ChainProvider + ?Sized,
{
    let block = provider
        .block_by_hash(block_hash, BlockTransactionsKind::Hashes)
        .await?
        .ok_or(ChangeError::MissingBlock(block_hash))?;

    ensure_single_transaction(&block)?;
    debug!(%block_hash, "block contains only the transaction under test");
    Ok(block)
}

/// Requires the block to hold exactly one transaction.
pub(crate) fn ensure_single_transaction(block: &BlockRecord) -> Result<(), ChangeError> {
    let count = block.transaction_count();
    if count != 1 {
        return Err(ChangeError::MultipleTransactionsInBlock {
            block_hash: block.hash(),
            count,
        });
    }
    Ok(())
}
