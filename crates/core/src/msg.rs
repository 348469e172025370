use std::sync::Arc;

use bincode::{Decode, Encode};
use derive_more::Deref;

/// An encoded, not yet decoded, module message
///
/// Only the module a message is routed to knows how to decode it.
#[derive(Clone, PartialEq, Eq, Encode, Decode, Deref)]
pub struct MsgRaw(pub Arc<[u8]>);

impl std::fmt::Debug for MsgRaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MsgRaw")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for MsgRaw {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into())
    }
}
