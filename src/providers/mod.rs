pub mod stdin;

pub use stdin::{JsonPayloadCollector, PayloadCollector, StubPayloadCollector};
