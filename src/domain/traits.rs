// ============================================================
// Core Traits
// ============================================================
// The preprocessing functions never name a concrete tokenizer.
// They take anything implementing `TokenEncoder`:
//
//   - HfEncoder  → wraps a HuggingFace `tokenizers::Tokenizer`
//   - FnEncoder  → wraps a plain closure (handy in tests and
//                  for callers with their own vocabulary)
//
// Configuration files go through `Persistable`.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::error::Result;

// ─── TokenEncoder ─────────────────────────────────────────────────────────────
/// Turns one line of text into a sequence of token ids.
pub trait TokenEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;
}

impl<T: TokenEncoder + ?Sized> TokenEncoder for &T {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }
}

impl<T: TokenEncoder + ?Sized> TokenEncoder for Box<T> {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }
}

// ─── FnEncoder ────────────────────────────────────────────────────────────────
/// Adapts an infallible closure into a `TokenEncoder`.
pub struct FnEncoder<F>(pub F);

impl<F> TokenEncoder for FnEncoder<F>
where
    F: Fn(&str) -> Vec<u32>,
{
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok((self.0)(text))
    }
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved to and restored from disk.
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_encoder_delegates_to_closure() {
        let enc = FnEncoder(|s: &str| s.bytes().map(u32::from).collect());
        assert_eq!(enc.encode("ab").unwrap(), vec![97, 98]);
    }

    #[test]
    fn test_encoder_usable_through_reference_and_box() {
        let enc = FnEncoder(|s: &str| vec![s.len() as u32]);
        let by_ref: &dyn TokenEncoder = &enc;
        assert_eq!(by_ref.encode("abc").unwrap(), vec![3]);

        let boxed: Box<dyn TokenEncoder> = Box::new(FnEncoder(|_: &str| vec![7]));
        assert_eq!(boxed.encode("x").unwrap(), vec![7]);
    }
}
