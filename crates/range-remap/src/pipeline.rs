//! Layer-by-layer interval remapping.
//!
//! The engine reduces a working set of intervals through an ordered sequence
//! of layers. Each layer is drained with an explicit worklist: pending
//! intervals are popped, matched against the layer's rules, split where a
//! rule domain only partially covers them, and accumulated into a fresh
//! "done" set. Nothing is mutated while being iterated, and no interval
//! survives from one layer's working set into the next.

use smallvec::SmallVec;

use crate::interval::Interval;
use crate::layer::Layer;

/// Worklist stack for one layer reduction. Most real inputs split into a
/// handful of pieces, so the stack usually stays inline.
type WorkStack = SmallVec<[Interval; 32]>;

/// An ordered sequence of layers applied front to back.
///
/// Layers are validated at construction ([`Layer::new`]), so applying the
/// pipeline is an infallible pure function. A pipeline with no layers is
/// the identity.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    layers: Vec<Layer>,
}

impl Pipeline {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Pass a multiset of intervals through every layer in order.
    ///
    /// Zero-length inputs are discarded up front; the output never contains
    /// a zero-length interval. Duplicates and overlaps in the input are
    /// preserved, not merged — each interval flows through independently.
    pub fn apply(&self, inputs: &[Interval]) -> Vec<Interval> {
        let mut working: Vec<Interval> = inputs
            .iter()
            .copied()
            .filter(|interval| !interval.is_empty())
            .collect();

        for (index, layer) in self.layers.iter().enumerate() {
            working = apply_layer(layer, working);
            log::debug!(
                "layer {}: working set now {} intervals",
                index,
                working.len()
            );
        }

        working
    }

    /// Pass a single value through every layer (scalar path).
    pub fn apply_value(&self, value: i64) -> i64 {
        self.layers
            .iter()
            .fold(value, |v, layer| layer.translate_value(v))
    }

    /// Smallest start across the output intervals, or `None` for an empty
    /// input. The aggregate most callers extract.
    pub fn min_start(&self, inputs: &[Interval]) -> Option<i64> {
        self.apply(inputs).iter().map(Interval::start).min()
    }
}

/// Reduce the working set through one layer.
fn apply_layer(layer: &Layer, working: Vec<Interval>) -> Vec<Interval> {
    let mut done = Vec::with_capacity(working.len());
    let mut pending = WorkStack::from_vec(working);

    while let Some(interval) = pending.pop() {
        match layer.find_overlapping(&interval) {
            // No rule touches this interval: identity pass-through.
            None => done.push(interval),
            Some(rule) => {
                let split = interval.split_by(&rule.domain());

                // Leftovers still have to face the layer's other rules.
                if let Some(before) = split.before {
                    pending.push(before);
                }
                if let Some(after) = split.after {
                    pending.push(after);
                }

                // The matched piece is final for this layer: rule domains
                // are disjoint, so no other rule can claim it.
                if let Some(hit) = split.overlap {
                    done.push(hit.translate(rule.offset()));
                }
            }
        }
    }

    done
}
