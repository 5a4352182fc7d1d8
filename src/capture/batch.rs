use std::fmt;

use serde::Serialize;

use super::{BATCH_SIZE, LogicalBitmap};

/// Digit label attached to a training sample, always in `0..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DigitLabel(u8);

impl DigitLabel {
    /// Parse user input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let value: u8 = input.trim().parse().ok()?;
        Self::new(value)
    }

    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DigitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One labelled drawing queued for training.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainingSample {
    #[serde(rename = "y0")]
    image: LogicalBitmap,
    label: DigitLabel,
}

impl TrainingSample {
    pub fn new(image: LogicalBitmap, label: DigitLabel) -> Self {
        Self { image, label }
    }

    pub fn image(&self) -> &LogicalBitmap {
        &self.image
    }

    pub fn label(&self) -> DigitLabel {
        self.label
    }
}

/// Samples waiting for the next flush. Never holds more than [`BATCH_SIZE`].
#[derive(Clone, Debug, Default)]
pub struct TrainingBatch {
    samples: Vec<TrainingSample>,
}

impl TrainingBatch {
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(BATCH_SIZE),
        }
    }

    /// Append a sample, handing back the full batch once it reaches capacity.
    ///
    /// When a batch is returned the queue is already empty again.
    pub fn push(&mut self, sample: TrainingSample) -> Option<Vec<TrainingSample>> {
        self.samples.push(sample);
        if self.samples.len() < BATCH_SIZE {
            return None;
        }
        Some(std::mem::replace(
            &mut self.samples,
            Vec::with_capacity(BATCH_SIZE),
        ))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: u8) -> TrainingSample {
        let mut image = LogicalBitmap::new();
        image.paint_at(label as f32 * 10.0, 0.0);
        TrainingSample::new(image, DigitLabel::new(label).unwrap())
    }

    #[test]
    fn label_parsing_accepts_single_digits_only() {
        assert_eq!(DigitLabel::parse(" 7 ").map(DigitLabel::value), Some(7));
        assert_eq!(DigitLabel::parse("0").map(DigitLabel::value), Some(0));
        assert!(DigitLabel::parse("").is_none());
        assert!(DigitLabel::parse("10").is_none());
        assert!(DigitLabel::parse("-1").is_none());
        assert!(DigitLabel::parse("seven").is_none());
    }

    #[test]
    fn batch_flushes_exactly_at_capacity() {
        let mut batch = TrainingBatch::new();
        for index in 0..BATCH_SIZE - 1 {
            assert!(batch.push(sample(index as u8 % 10)).is_none());
            assert_eq!(batch.len(), index + 1);
        }
        let flushed = batch.push(sample(3)).expect("tenth sample flushes");
        assert_eq!(flushed.len(), BATCH_SIZE);
        assert!(batch.is_empty());

        assert!(batch.push(sample(4)).is_none());
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn flushed_samples_keep_submission_order() {
        let mut batch = TrainingBatch::new();
        let mut flushed = None;
        for label in 0..BATCH_SIZE as u8 {
            flushed = batch.push(sample(label));
        }
        let labels: Vec<u8> = flushed
            .unwrap()
            .iter()
            .map(|sample| sample.label().value())
            .collect();
        assert_eq!(labels, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn sample_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample(2)).unwrap();
        assert_eq!(value["label"], serde_json::json!(2));
        assert_eq!(value["y0"].as_array().unwrap().len(), 400);
        assert_eq!(value["y0"][2], serde_json::json!(1));
    }
}
