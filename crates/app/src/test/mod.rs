//! Test support for service-level tests.


pub(crate) use context::TestContext;
pub(crate) use notify::{RecordingNotifier, Toast};

/// A fresh `serde_json` decode error, for stores that need to fail.
pub(crate) fn corrupt_json_error() -> serde_json::Error {
    serde_json::from_str::<theka_core::cart::Cart>("{not json")
        .expect_err("decoding garbage must fail")
}
