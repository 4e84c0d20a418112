// ============================================================
// Summarization Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec of prepared
// items into Int tensors of shape [batch_size, block_size].
//
// Every item is already block-size normalised, so stacking is
// a flatten + reshape. The masks and segment ids are derived
// here from the stacked source/target ids:
//
//   src          — source ids
//   src_mask     — build_mask(src, pad)
//   src_segments — compute_token_type_ids(src rows, separator)
//   tgt          — target ids
//   tgt_mask     — build_mask(tgt, pad)
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::SummarizationItem;
use crate::data::encoding::{build_mask, compute_token_type_ids};

// ─── SummarizationBatch ───────────────────────────────────────────────────────
/// All tensors have shape [batch_size, block_size].
#[derive(Debug, Clone)]
pub struct SummarizationBatch<B: Backend> {
    pub src:          Tensor<B, 2, Int>,
    pub src_mask:     Tensor<B, 2, Int>,
    pub src_segments: Tensor<B, 2, Int>,
    pub tgt:          Tensor<B, 2, Int>,
    pub tgt_mask:     Tensor<B, 2, Int>,
}

// ─── SummarizationBatcher ─────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct SummarizationBatcher<B: Backend> {
    pub device:             B::Device,
    pub pad_token_id:       u32,
    pub separator_token_id: u32,
}

impl<B: Backend> SummarizationBatcher<B> {
    pub fn new(device: B::Device, pad_token_id: u32, separator_token_id: u32) -> Self {
        Self { device, pad_token_id, separator_token_id }
    }

    fn stack(&self, rows: &[Vec<u32>], block_size: usize) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = rows
            .iter()
            .flat_map(|row| row.iter().map(|&x| x as i32))
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([rows.len(), block_size])
    }
}

impl<B: Backend> Batcher<SummarizationItem, SummarizationBatch<B>> for SummarizationBatcher<B> {
    fn batch(&self, items: Vec<SummarizationItem>) -> SummarizationBatch<B> {
        let block_size = items.first().map_or(0, |item| item.src_ids.len());

        let src_rows: Vec<Vec<u32>> = items.iter().map(|i| i.src_ids.clone()).collect();
        let tgt_rows: Vec<Vec<u32>> = items.iter().map(|i| i.tgt_ids.clone()).collect();

        let src_mask_rows: Vec<Vec<u32>> = src_rows
            .iter()
            .map(|row| build_mask(row, self.pad_token_id))
            .collect();
        let tgt_mask_rows: Vec<Vec<u32>> = tgt_rows
            .iter()
            .map(|row| build_mask(row, self.pad_token_id))
            .collect();
        let segment_rows = compute_token_type_ids(&src_rows, self.separator_token_id);

        SummarizationBatch {
            src:          self.stack(&src_rows, block_size),
            src_mask:     self.stack(&src_mask_rows, block_size),
            src_segments: self.stack(&segment_rows, block_size),
            tgt:          self.stack(&tgt_rows, block_size),
            tgt_mask:     self.stack(&tgt_mask_rows, block_size),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn to_rows(t: Tensor<TestBackend, 2, Int>) -> Vec<i64> {
        t.into_data().convert::<i64>().to_vec::<i64>().unwrap()
    }

    fn item(id: &str, src: Vec<u32>, tgt: Vec<u32>) -> SummarizationItem {
        SummarizationItem { id: id.to_string(), src_ids: src, tgt_ids: tgt }
    }

    #[test]
    fn test_batch_shapes_and_contents() {
        let device  = Default::default();
        let batcher = SummarizationBatcher::<TestBackend>::new(device, 0, 102);

        let batch = batcher.batch(vec![
            item("0", vec![101, 5, 102, 101, 6, 102], vec![101, 7, 102, 0, 0, 0]),
            item("1", vec![101, 8, 102, 0, 0, 0],     vec![0, 0, 0, 0, 0, 0]),
        ]);

        assert_eq!(batch.src.dims(), [2, 6]);
        assert_eq!(batch.tgt_mask.dims(), [2, 6]);

        assert_eq!(
            to_rows(batch.src),
            vec![101, 5, 102, 101, 6, 102, 101, 8, 102, 0, 0, 0]
        );
        assert_eq!(
            to_rows(batch.src_mask),
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0]
        );
        assert_eq!(
            to_rows(batch.src_segments),
            vec![1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0]
        );
        assert_eq!(
            to_rows(batch.tgt_mask),
            vec![1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }
}
