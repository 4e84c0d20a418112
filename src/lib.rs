// ============================================================
// summarization-prep
// ============================================================
// Preprocessing utilities for a summarization training pipeline.
//
// The crate is split into layers, lowest first:
//
//   domain/       — plain types and traits (Sample, TokenEncoder)
//   data/         — CSV sample source, sequence transforms,
//                   line splitting, Burn batching
//   infra/        — tokenizer persistence, JSON configuration
//   application/  — the end-to-end preparation workflow
//
// The training loop itself lives outside this crate. It supplies
// the block size, pad id and separator id, and consumes the
// encoded sequences (or the tensor batches built from them).
//
// Reference: Rust Book §7 (Modules)

pub mod application;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;

pub use data::dataset::{PreparedDataset, SummarizationDataset, SummarizationItem};
pub use data::encoding::{
    build_mask, compute_token_type_ids, encode_for_summarization, fit_to_block_size,
};
pub use domain::sample::Sample;
pub use domain::traits::TokenEncoder;
pub use error::{PrepError, Result};
