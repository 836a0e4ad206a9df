//! Centralized mocks and fixtures for testing
//!
//! A local provider server standing in for OncoKB, CIViC, ClinicalTrials.gov
//! and the completion service, plus timing-controlled adapters.

pub mod adapters;
pub mod source_server;

#[allow(unused_imports)]
pub use adapters::{RecordingCompletion, TimingControlledAdapter};
#[allow(unused_imports)]
pub use source_server::{MockSourceServer, SourceMode};
