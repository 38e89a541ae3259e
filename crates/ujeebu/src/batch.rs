//! Sequential batch execution
//!
//! Items run one at a time, in input order, each making exactly one
//! network round trip. Resource and operation are resolved once for the
//! whole batch: every item goes through the same handler, so a batch
//! cannot mix operations.

use crate::error::UjeebuError;
use crate::item::{InputItem, OutputItem};
use crate::ops::{Operation, Registry, Resource};
use crate::transport::Client;

/// Run a batch of items through one operation
///
/// With `continue_on_fail`, a failed item becomes an output item whose
/// JSON carries the error message under `error`, and processing moves on.
/// Without it, the first failure aborts the batch and is returned
/// verbatim; items after it are not processed.
///
/// Output order matches input order one-to-one.
pub async fn run_batch(
    client: &Client,
    resource: Resource,
    operation: Operation,
    items: &[InputItem],
    continue_on_fail: bool,
) -> Result<Vec<OutputItem>, UjeebuError> {
    let registry = Registry::with_defaults();
    let mut output = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let result = match registry.get(resource, operation) {
            Ok(handler) => {
                tracing::debug!(handler = handler.name(), index, "executing item");
                handler.execute(client, item).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(done) => output.push(done),
            Err(err) if continue_on_fail => {
                tracing::warn!(index, error = %err, "item failed, continuing");
                output.push(OutputItem::from_error(&err));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(output)
}

/// Run a single item through one operation
pub async fn run_one(
    client: &Client,
    resource: Resource,
    operation: Operation,
    item: InputItem,
) -> Result<OutputItem, UjeebuError> {
    let registry = Registry::with_defaults();
    let handler = registry.get(resource, operation)?;
    handler.execute(client, &item).await
}
