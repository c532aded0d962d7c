use thiserror::Error;

/// Errors that can occur while decoding a byte stream.
///
/// Decode errors are fatal to the operation that raised them: accepting
/// malformed or unknown wire data silently would desynchronize the local
/// shadow state from the authoritative copy with no recovery path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The byte stream ended before the value could be read in full
    #[error("byte stream ended while {needed} more byte(s) were expected")]
    UnexpectedEnd { needed: usize },

    /// A variable-length unsigned integer ran past the 64-bit ceiling
    #[error("var-uint continuation exceeds 64 bits")]
    VarUintOverflow,

    /// An id was decoded that is not present in the local registry
    #[error("unknown {what} id {id} is not present in the local registry")]
    UnknownId { what: &'static str, id: u64 },
}
