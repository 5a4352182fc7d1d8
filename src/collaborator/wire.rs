use serde::{Deserialize, Serialize};

use crate::capture::{LogicalBitmap, TrainingSample};

/// Which action produced a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Train,
    Predict,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Predict => "predict",
        }
    }
}

/// Body of a POST to the collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CollaboratorRequest {
    Train(TrainRequest),
    Predict(PredictRequest),
}

impl CollaboratorRequest {
    /// `{"train": true, "trainArray": [...]}`
    pub fn train(samples: Vec<TrainingSample>) -> Self {
        Self::Train(TrainRequest {
            train: true,
            samples,
        })
    }

    /// `{"predict": true, "image": [...]}`
    pub fn predict(image: LogicalBitmap) -> Self {
        Self::Predict(PredictRequest {
            predict: true,
            image,
        })
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Train(_) => RequestKind::Train,
            Self::Predict(_) => RequestKind::Predict,
        }
    }
}

/// A full training batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainRequest {
    train: bool,
    #[serde(rename = "trainArray")]
    samples: Vec<TrainingSample>,
}

impl TrainRequest {
    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }
}

/// A single drawing to classify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    predict: bool,
    image: LogicalBitmap,
}

/// Validated 2xx reply from the collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollaboratorReply {
    /// Prediction result, rendered as text.
    Test { result: String },
    /// Acknowledgement of a training batch.
    Train { status: Option<String> },
    /// Error reported inside a successful HTTP exchange.
    Error { message: String },
    /// Any other `type`, or none at all.
    Other { kind: Option<String> },
}

#[derive(Debug, Deserialize)]
struct ReplyWire {
    #[serde(rename = "type")]
    kind: Option<String>,
    result: Option<serde_json::Value>,
    status: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyWire {
    message: Option<serde_json::Value>,
}

impl CollaboratorReply {
    /// Parse a 2xx body. A `test` reply without `result` is rejected.
    pub(crate) fn parse(body: &str) -> Result<Self, String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err("Empty response body".to_string());
        }
        let wire: ReplyWire =
            serde_json::from_str(trimmed).map_err(|err| format!("{err}: {trimmed}"))?;
        match wire.kind.as_deref() {
            Some("test") => {
                let result = wire
                    .result
                    .filter(|value| !value.is_null())
                    .ok_or_else(|| "Missing result in test reply".to_string())?;
                Ok(Self::Test {
                    result: display_value(result),
                })
            }
            Some("train") => Ok(Self::Train {
                status: text_field(wire.status),
            }),
            Some("error") => Ok(Self::Error {
                message: text_field(wire.message).unwrap_or_else(|| "Unknown error".to_string()),
            }),
            _ => Ok(Self::Other { kind: wire.kind }),
        }
    }
}

/// Extract `message` from a non-2xx body, if it has one.
pub(crate) fn parse_error_message(body: &str) -> Option<String> {
    let wire: ErrorBodyWire = serde_json::from_str(body.trim()).ok()?;
    text_field(wire.message)
}

fn text_field(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        value => Some(display_value(value)),
    }
}

fn display_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}
