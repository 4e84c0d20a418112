// ============================================================
// Sequence Encoding
// ============================================================
// The four transforms the training loop applies to every
// document before batching:
//
//   encode_for_summarization — tokenise source and summary lines,
//                              flatten each into one sequence
//   fit_to_block_size        — truncate or right-pad to exactly
//                              `block_size` ids
//   build_mask               — 1 for content, 0 for padding
//   compute_token_type_ids   — alternating 0/1 segment labels,
//                              flipping at every separator
//
// Example (pad = 0, block_size = 6, separator = 102):
//
//   ids       [101, 7, 102, 101, 9, 102]  → fit → unchanged
//   ids       [101, 7, 102]               → fit → [101, 7, 102, 0, 0, 0]
//   mask      [101, 7, 102, 0, 0, 0]      →       [1, 1, 1, 0, 0, 0]
//   segments  [101, 7, 102, 101, 9, 102]  →       [1, 1, 0, 0, 0, 1]
//
// Segment labels follow Liu & Lapata (2019), "Text Summarization
// with Pretrained Encoders" (PreSumm data_builder).
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

use crate::domain::traits::TokenEncoder;
use crate::error::Result;

/// Truncate `sequence` to its first `block_size` ids, or append
/// `pad_token_id` until it is exactly `block_size` long.
///
/// The input is left untouched; a new vector is always returned.
pub fn fit_to_block_size(sequence: &[u32], block_size: usize, pad_token_id: u32) -> Vec<u32> {
    if sequence.len() > block_size {
        return sequence[..block_size].to_vec();
    }

    let mut fitted = Vec::with_capacity(block_size);
    fitted.extend_from_slice(sequence);
    fitted.resize(block_size, pad_token_id);
    fitted
}

/// Attention mask for `sequence`: 0 where the id equals
/// `pad_token_id`, 1 everywhere else.
pub fn build_mask(sequence: &[u32], pad_token_id: u32) -> Vec<u32> {
    sequence
        .iter()
        .map(|&id| u32::from(id != pad_token_id))
        .collect()
}

/// Tokenise every line of the source and the summary and
/// concatenate the per-line ids into one sequence each.
///
/// No separator or class ids are inserted here. Sentence
/// boundaries only show up in the output if the encoder itself
/// emits them per line (e.g. `HfEncoder` with special tokens on).
pub fn encode_for_summarization<S, T, E>(
    abs_lines:     &[S],
    summary_lines: &[T],
    tokenizer:     &E,
) -> Result<(Vec<u32>, Vec<u32>)>
where
    S: AsRef<str>,
    T: AsRef<str>,
    E: TokenEncoder + ?Sized,
{
    let abs_token_ids     = encode_lines(abs_lines, tokenizer)?;
    let summary_token_ids = encode_lines(summary_lines, tokenizer)?;
    Ok((abs_token_ids, summary_token_ids))
}

fn encode_lines<S, E>(lines: &[S], tokenizer: &E) -> Result<Vec<u32>>
where
    S: AsRef<str>,
    E: TokenEncoder + ?Sized,
{
    let mut flat = Vec::new();
    for line in lines {
        flat.extend(tokenizer.encode(line.as_ref())?);
    }
    Ok(flat)
}

/// Segment ids for one sequence.
///
/// A sentence counter starts at -1 and is bumped *before* labelling
/// each separator, so the separator already belongs to the next
/// sentence. The label is the counter's non-negative parity, which
/// gives 1 to everything preceding the first separator.
pub fn token_type_ids(sequence: &[u32], separator_token_id: u32) -> Vec<u32> {
    let mut sentence_num: i64 = -1;
    sequence
        .iter()
        .map(|&id| {
            if id == separator_token_id {
                sentence_num += 1;
            }
            sentence_num.rem_euclid(2) as u32
        })
        .collect()
}

/// Segment ids for a whole batch. Each row is labelled
/// independently and keeps its own length.
pub fn compute_token_type_ids<S>(batch: &[S], separator_token_id: u32) -> Vec<Vec<u32>>
where
    S: AsRef<[u32]>,
{
    batch
        .iter()
        .map(|sequence| token_type_ids(sequence.as_ref(), separator_token_id))
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::FnEncoder;
    use crate::error::PrepError;

    const PAD: u32 = 0;
    const SEP: u32 = 102;

    /// Maps each whitespace word to its length, wrapped in [101 .. 102]
    fn bracketing_encoder() -> FnEncoder<impl Fn(&str) -> Vec<u32>> {
        FnEncoder(|line: &str| {
            let mut ids = vec![101];
            ids.extend(line.split_whitespace().map(|w| w.len() as u32));
            ids.push(SEP);
            ids
        })
    }

    struct FailingEncoder;

    impl TokenEncoder for FailingEncoder {
        fn encode(&self, text: &str) -> Result<Vec<u32>> {
            Err(PrepError::Tokenizer(format!("cannot encode '{text}'")))
        }
    }

    #[test]
    fn test_fit_pads_short_sequence() {
        let out = fit_to_block_size(&[5, 6, 7], 6, PAD);
        assert_eq!(out, vec![5, 6, 7, 0, 0, 0]);
    }

    #[test]
    fn test_fit_truncates_long_sequence() {
        let out = fit_to_block_size(&[1, 2, 3, 4, 5], 3, PAD);
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_fit_exact_length_unchanged() {
        let out = fit_to_block_size(&[1, 2, 3], 3, PAD);
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_fit_zero_block_size_is_empty() {
        assert!(fit_to_block_size(&[1, 2, 3], 0, PAD).is_empty());
        assert!(fit_to_block_size(&[], 0, PAD).is_empty());
    }

    #[test]
    fn test_fit_empty_input_all_padding() {
        assert_eq!(fit_to_block_size(&[], 4, 9), vec![9, 9, 9, 9]);
    }

    #[test]
    fn test_fit_leaves_input_untouched() {
        let input = vec![1, 2];
        let _ = fit_to_block_size(&input, 5, PAD);
        assert_eq!(input, vec![1, 2]);
    }

    #[test]
    fn test_fit_length_always_block_size() {
        let input: Vec<u32> = (1..=20).collect();
        for block in 0..30 {
            let out = fit_to_block_size(&input, block, PAD);
            assert_eq!(out.len(), block);
            let kept = block.min(input.len());
            assert_eq!(&out[..kept], &input[..kept]);
            assert!(out[kept..].iter().all(|&id| id == PAD));
        }
    }

    #[test]
    fn test_fit_is_idempotent() {
        for input in [vec![1, 2, 3], vec![1, 2, 3, 4, 5, 6, 7, 8], vec![]] {
            let once  = fit_to_block_size(&input, 5, PAD);
            let twice = fit_to_block_size(&once, 5, PAD);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_mask_zero_exactly_at_padding() {
        let seq  = [101, 7, 102, 0, 0];
        let mask = build_mask(&seq, PAD);
        assert_eq!(mask, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_mask_respects_custom_pad_id() {
        // Interior pad ids are masked too, not just the tail
        let seq = [3, 1, 3, 2];
        assert_eq!(build_mask(&seq, 3), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_mask_empty() {
        assert!(build_mask(&[], PAD).is_empty());
    }

    #[test]
    fn test_token_types_alternate_per_sentence() {
        let (a, b, c) = (11, 12, 13);
        let out = compute_token_type_ids(&[vec![a, SEP, b, SEP, c]], SEP);
        assert_eq!(out, vec![vec![1, 0, 0, 1, 1]]);
    }

    #[test]
    fn test_token_types_leading_separator() {
        let out = token_type_ids(&[SEP, 5, SEP, 6, SEP], SEP);
        assert_eq!(out, vec![0, 0, 1, 1, 0]);
    }

    #[test]
    fn test_token_types_without_separator_all_one() {
        assert_eq!(token_type_ids(&[4, 5, 6], SEP), vec![1, 1, 1]);
    }

    #[test]
    fn test_token_types_batch_rows_independent() {
        let batch = vec![vec![1, SEP, 2], vec![SEP, SEP, SEP, 3]];
        let out   = compute_token_type_ids(&batch, SEP);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], vec![1, 0, 0]);
        // Second row starts from -1 again
        assert_eq!(out[1], vec![0, 1, 0, 0]);
    }

    #[test]
    fn test_token_types_empty_rows() {
        let batch: Vec<Vec<u32>> = vec![vec![], vec![SEP]];
        let out = compute_token_type_ids(&batch, SEP);
        assert_eq!(out, vec![vec![], vec![0]]);
        assert!(compute_token_type_ids::<Vec<u32>>(&[], SEP).is_empty());
    }

    #[test]
    fn test_encode_flattens_lines() {
        let enc = bracketing_encoder();
        let (src, tgt) = encode_for_summarization(
            &["the cat", "sat"],
            &["a summary line"],
            &enc,
        )
        .unwrap();

        assert_eq!(src, vec![101, 3, 3, SEP, 101, 3, SEP]);
        assert_eq!(tgt, vec![101, 1, 7, 4, SEP]);
    }

    #[test]
    fn test_encode_inserts_no_separators_itself() {
        // Encoder without special tokens: lines are simply concatenated
        let enc = FnEncoder(|line: &str| line.bytes().map(u32::from).collect());
        let (src, tgt) = encode_for_summarization(&["ab", "c"], &[] as &[&str], &enc).unwrap();
        assert_eq!(src, vec![97, 98, 99]);
        assert!(tgt.is_empty());
    }

    #[test]
    fn test_encode_propagates_tokenizer_failure() {
        let err = encode_for_summarization(&["x"], &["y"], &FailingEncoder).unwrap_err();
        assert!(matches!(err, PrepError::Tokenizer(_)));
    }

    #[test]
    fn test_encoded_lines_segment_on_separator() {
        let enc = bracketing_encoder();
        let (src, _) = encode_for_summarization(&["aa", "bbb"], &["c"], &enc).unwrap();
        // [101, 2, 102, 101, 3, 102]
        assert_eq!(token_type_ids(&src, SEP), vec![1, 1, 0, 0, 0, 1]);
    }
}
