// ============================================================
// Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the pipeline
// works with. Nothing in here touches the filesystem, Burn
// tensors, or a concrete tokenizer.
//
// Token sequences are plain `Vec<u32>` / `&[u32]` throughout,
// the same element type the tokenizers crate hands out.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// One row of the summarization corpus
pub mod sample;

/// Tokenizer capability and persistence traits
pub mod traits;
