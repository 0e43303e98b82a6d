//! Translation rules and the per-layer rule table.
//!
//! A [`Layer`] is one stage of the pipeline: a table of rules whose source
//! domains are disjoint, plus an implicit identity default for values no
//! rule covers. Disjointness is a hard precondition checked at construction;
//! the engine never arbitrates between conflicting rules.

use serde::{Deserialize, Serialize};

use crate::error::RemapError;
use crate::interval::Interval;

/// A single source-domain to destination translation.
///
/// Any value `v` with `source_start <= v < source_start + length` maps to
/// `v - source_start + destination_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub source_start: i64,
    pub destination_start: i64,
    pub length: i64,
}

impl Rule {
    pub fn new(source_start: i64, destination_start: i64, length: i64) -> Self {
        Self {
            source_start,
            destination_start,
            length,
        }
    }

    /// The source domain as an interval.
    ///
    /// A negative length never survives layer validation; a bare rule
    /// carrying one is treated as an empty domain.
    pub fn domain(&self) -> Interval {
        Interval::new_unchecked(self.source_start, self.length.max(0))
    }

    /// Destination shift applied to matched values.
    pub fn offset(&self) -> i64 {
        self.destination_start - self.source_start
    }

    /// True if `value` falls inside the source domain.
    pub fn covers(&self, value: i64) -> bool {
        self.source_start <= value && value < self.source_start + self.length
    }

    /// Translate a single covered value.
    pub fn translate(&self, value: i64) -> i64 {
        value + self.offset()
    }
}

/// A validated table of disjoint-domain rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayer")]
pub struct Layer {
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    rules: Vec<Rule>,
}

impl TryFrom<RawLayer> for Layer {
    type Error = RemapError;

    fn try_from(raw: RawLayer) -> Result<Self, Self::Error> {
        Layer::new(raw.rules)
    }
}

impl Layer {
    /// Build a layer, rejecting negative rule lengths and overlapping
    /// source domains. Rule order is preserved but never affects results.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RemapError> {
        for rule in &rules {
            if rule.length < 0 {
                return Err(RemapError::InvalidInterval {
                    start: rule.source_start,
                    length: rule.length,
                });
            }
        }

        // Zero-length rules cover nothing and cannot conflict.
        let mut by_start: Vec<&Rule> = rules.iter().filter(|r| r.length > 0).collect();
        by_start.sort_by_key(|r| r.source_start);
        for pair in by_start.windows(2) {
            if pair[1].source_start < pair[0].source_start + pair[0].length {
                return Err(RemapError::InvalidLayer {
                    first: pair[0].source_start,
                    second: pair[1].source_start,
                });
            }
        }

        Ok(Self { rules })
    }

    /// An empty layer: pure identity.
    pub fn identity() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose source domain overlaps `interval`.
    ///
    /// An interval may overlap several rules; any one of them is a valid
    /// starting point since the leftovers are re-queued against the rest.
    pub fn find_overlapping(&self, interval: &Interval) -> Option<&Rule> {
        self.rules
            .iter()
            .filter(|rule| rule.length > 0)
            .find(|rule| rule.domain().overlaps(interval))
    }

    /// Translate a single value, falling back to identity when no rule
    /// covers it.
    pub fn translate_value(&self, value: i64) -> i64 {
        match self.rules.iter().find(|rule| rule.covers(value)) {
            Some(rule) => rule.translate(value),
            None => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_translation() {
        let rule = Rule::new(50, 98, 2);
        assert_eq!(rule.offset(), 48);
        assert!(rule.covers(50));
        assert!(rule.covers(51));
        assert!(!rule.covers(52));
        assert!(!rule.covers(49));
        assert_eq!(rule.translate(51), 99);
    }

    #[test]
    fn test_layer_rejects_overlapping_domains() {
        // [50, 60) and [55, 65) conflict
        let err = Layer::new(vec![Rule::new(50, 0, 10), Rule::new(55, 100, 10)]);
        assert_eq!(
            err,
            Err(RemapError::InvalidLayer {
                first: 50,
                second: 55
            })
        );

        // Order of definition does not matter for detection
        let err = Layer::new(vec![Rule::new(55, 100, 10), Rule::new(50, 0, 10)]);
        assert_eq!(
            err,
            Err(RemapError::InvalidLayer {
                first: 50,
                second: 55
            })
        );
    }

    #[test]
    fn test_layer_accepts_touching_domains() {
        // [50, 60) and [60, 70) share no value
        let layer = Layer::new(vec![Rule::new(50, 0, 10), Rule::new(60, 100, 10)]);
        assert!(layer.is_ok());
    }

    #[test]
    fn test_layer_rejects_negative_rule_length() {
        let err = Layer::new(vec![Rule::new(50, 0, -3)]);
        assert_eq!(
            err,
            Err(RemapError::InvalidInterval {
                start: 50,
                length: -3
            })
        );
    }

    #[test]
    fn test_zero_length_rules_are_inert() {
        let layer =
            Layer::new(vec![Rule::new(50, 0, 0), Rule::new(50, 100, 10)]).unwrap();
        assert_eq!(layer.translate_value(50), 150);
        let probe = Interval::new(50, 1).unwrap();
        assert_eq!(
            layer.find_overlapping(&probe).map(|r| r.destination_start),
            Some(100)
        );
    }

    #[test]
    fn test_translate_value_identity_fallback() {
        let layer = Layer::new(vec![Rule::new(50, 52, 48), Rule::new(98, 50, 2)]).unwrap();
        assert_eq!(layer.translate_value(79), 81);
        assert_eq!(layer.translate_value(99), 51);
        assert_eq!(layer.translate_value(10), 10);
        assert_eq!(layer.translate_value(13), 13);
    }

    #[test]
    fn test_find_overlapping() {
        let layer = Layer::new(vec![Rule::new(50, 52, 48)]).unwrap();
        let inside = Interval::new(60, 5).unwrap();
        let outside = Interval::new(0, 50).unwrap();
        let straddling = Interval::new(40, 20).unwrap();

        assert!(layer.find_overlapping(&inside).is_some());
        assert!(layer.find_overlapping(&outside).is_none());
        assert!(layer.find_overlapping(&straddling).is_some());
    }

    #[test]
    fn test_layer_deserialize_validates() {
        let ok: Layer = serde_json::from_str(
            r#"{"rules":[{"sourceStart":50,"destinationStart":52,"length":48}]}"#,
        )
        .unwrap();
        assert_eq!(ok.rules().len(), 1);

        let bad = serde_json::from_str::<Layer>(
            r#"{"rules":[
                {"sourceStart":50,"destinationStart":0,"length":10},
                {"sourceStart":55,"destinationStart":100,"length":10}
            ]}"#,
        );
        assert!(bad.is_err());
    }
}
