#![allow(dead_code)]

pub use taskdag_test_utils::{builders, capture, init_tracing, timeline, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
