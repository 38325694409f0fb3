use tracing::debug;

use crate::{ChangeError, SentTransaction, TxReceipt};

/// Waits for the transaction to be mined and returns its receipt.
pub(crate) async fn wait_for_receipt<T>(tx: &T) -> Result<TxReceipt, ChangeError>
where
    T: SentTransaction + ?Sized,
{
    let tx_hash = tx.hash();
    let receipt = tx
        .wait()
        .await?
        .ok_or(ChangeError::NullReceipt { tx_hash })?;

    debug!(
        %tx_hash,
        block_hash = %receipt.block_hash,
        block_number = receipt.block_number,
        "transaction mined"
    );
    Ok(receipt)
}
