// ============================================================
// Application / Use Cases
// ============================================================
// Orchestrates the other layers. No sequence math lives here,
// only the order in which loading, tokenising and encoding run.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Corpus → encoded, block-size-normalised items
pub mod prepare_use_case;
