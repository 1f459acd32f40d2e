use crate::client::EntryLayout;
use crate::config::{ConfigDocument, ServerDescriptor};
use serde_json::{Map, Value};
use tracing::warn;

/// Effect of a merge on the registered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The entry did not exist before
    Inserted,
    /// A different entry under the same key was overwritten
    Replaced,
    /// The identical entry was already present
    Unchanged,
}

/// Upsert the server entry into a client configuration document.
///
/// Every object along `layout.key_path` is created if absent; a non-object
/// value in the way is replaced by an empty object. The entry under
/// `layout.entry_key` is replaced as a whole. Everything else in the document
/// is left as it was.
pub fn merge_server_entry(
    document: &mut ConfigDocument,
    layout: &EntryLayout,
    descriptor: &ServerDescriptor,
) -> MergeOutcome {
    let entry = descriptor.to_entry(layout);
    upsert_at(document, layout.key_path, layout.entry_key, entry)
}

fn upsert_at(map: &mut ConfigDocument, key_path: &[&str], entry_key: &str, entry: Value) -> MergeOutcome {
    let Some((key, rest)) = key_path.split_first() else {
        return match map.insert(entry_key.to_string(), entry.clone()) {
            None => MergeOutcome::Inserted,
            Some(previous) if previous == entry => MergeOutcome::Unchanged,
            Some(_) => MergeOutcome::Replaced,
        };
    };

    // Taken out and put back so the key keeps its position in the document
    let slot = map.entry(*key).or_insert_with(|| Value::Object(Map::new()));
    let mut inner = match std::mem::take(slot) {
        Value::Object(inner) => inner,
        _ => {
            warn!("Replacing non-object value at `{key}` with an empty object");
            Map::new()
        },
    };

    let outcome = upsert_at(&mut inner, rest, entry_key, entry);
    *slot = Value::Object(inner);
    outcome
}
