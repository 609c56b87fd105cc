// Library target exists for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that test and bench harnesses can import types via `clozer::engine::*` /
// `clozer::session::*`. Most code is only exercised through the binary, so
// suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests and benchmarks
pub mod engine;
pub mod ideas;
pub mod session;
pub mod store;

// Private: not part of the test surface, declared so the whole tree is
// checked under the lib target as well
mod app;
mod config;
mod event;
mod ui;
