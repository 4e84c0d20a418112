// ============================================================
// Infrastructure Layer
// ============================================================
// Cross-cutting concerns the data layer relies on:
//
//   tokenizer_store.rs — loads or builds a HuggingFace
//                        tokenizer.json and adapts it to the
//                        TokenEncoder trait (HfEncoder)
//
//   config.rs          — PrepareConfig, persisted as JSON
//
// Reference: Rust Book §7 (Modules)

/// Tokenizer loading/building and the HfEncoder adapter
pub mod tokenizer_store;

/// JSON-persisted preparation settings
pub mod config;
