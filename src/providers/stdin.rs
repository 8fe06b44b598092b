use crate::{
    error::{PulselineError, Result},
    types::StatusPayload,
};

/// Source of the segment list for one render cycle.
pub trait PayloadCollector {
    fn collect_payload(&self, input: &str) -> Result<StatusPayload>;
}

/// Parses the JSON document tmux pipes into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPayloadCollector;

impl PayloadCollector for JsonPayloadCollector {
    fn collect_payload(&self, input: &str) -> Result<StatusPayload> {
        let input = if input.trim().is_empty() { "{}" } else { input };
        serde_json::from_str(input).map_err(|err| PulselineError::InvalidPayload {
            details: err.to_string(),
        })
    }
}

/// Ignores its input and hands back a fixed payload.
#[derive(Debug, Default, Clone)]
pub struct StubPayloadCollector {
    pub payload: StatusPayload,
}

impl PayloadCollector for StubPayloadCollector {
    fn collect_payload(&self, _input: &str) -> Result<StatusPayload> {
        Ok(self.payload.clone())
    }
}
