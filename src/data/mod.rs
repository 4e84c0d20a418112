// ============================================================
// Data Pipeline
// ============================================================
// Everything from the CSV corpus to tensor batches.
//
//   <dir>/<prefix>.csv
//       │
//       ▼
//   SummarizationDataset   → row-indexed Sample source
//       │
//       ▼
//   Preprocessor           → abstract/title → sentence lines
//       │
//       ▼
//   encode_for_summarization + fit_to_block_size
//       │
//       ▼
//   PreparedDataset        → SummarizationItem per document
//       │
//       ▼
//   SummarizationBatcher   → tensors, masks, segment ids
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// CSV-backed sample source and the prepared item dataset
pub mod dataset;

/// Block-size fitting, masks, segment ids, line encoding
pub mod encoding;

/// Whitespace normalisation and sentence splitting
pub mod preprocessor;

/// Burn Batcher producing [batch, block] tensors
pub mod batcher;
