//! Hierarchical min/max summary of a sample row
//!
//! Level `l` holds the min/max of every aligned chunk of `FANOUT^(l+1)`
//! samples. An interval query covers its range with the largest complete
//! chunks it can and reads raw samples only at the ragged ends, so the cost
//! of aggregating one pixel column does not grow with the number of samples
//! inside it.

use crate::types::HiLoData;

/// Samples per chunk on level 0, and chunks per chunk on higher levels
pub const FANOUT: usize = 16;

/// Levels kept; the top level chunk covers `16^6` samples
const LEVELS: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct MinMaxSummary {
    levels: [Vec<HiLoData>; LEVELS],
}

const fn chunk_size(level: usize) -> usize {
    FANOUT.pow(level as u32 + 1)
}

impl MinMaxSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` as sample `index`; samples must be pushed in order
    pub fn push(&mut self, index: usize, value: f64) {
        for (level, chunks) in self.levels.iter_mut().enumerate() {
            let chunk = index / chunk_size(level);
            if chunk == chunks.len() {
                chunks.push(HiLoData::EMPTY);
            }
            debug_assert!(chunk < chunks.len(), "summary pushed out of order");
            if let Some(slot) = chunks.get_mut(chunk) {
                *slot = merge_sample(*slot, value);
            }
        }
    }

    /// Min/max of `values[first..=last]`.
    ///
    /// `values` is the raw row the summary was built from. Non-finite samples
    /// are skipped; the result is `HiLoData::EMPTY` if nothing finite remains.
    pub fn query(&self, values: &[f32], first: usize, last: usize) -> HiLoData {
        let last = last.min(values.len().saturating_sub(1));
        let mut acc = HiLoData::EMPTY;
        let mut i = first;
        while i <= last && i < values.len() {
            let mut step = 1;
            for level in (0..LEVELS).rev() {
                let size = chunk_size(level);
                if i % size == 0 && i + size - 1 <= last {
                    if let Some(chunk) = self.levels[level].get(i / size) {
                        acc = HiLoData::merge(acc, *chunk);
                        step = size;
                        break;
                    }
                }
            }
            if step == 1 {
                acc = merge_sample(acc, values[i] as f64);
            }
            i += step;
        }
        acc
    }

    pub fn clear(&mut self) {
        for chunks in self.levels.iter_mut() {
            chunks.clear();
        }
    }
}

fn merge_sample(acc: HiLoData, v: f64) -> HiLoData {
    if !v.is_finite() {
        return acc;
    }
    HiLoData::merge_from_value(Some(acc), v)
}
