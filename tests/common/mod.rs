//! Shared integration test helpers for listening-trainer.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` attribute suppresses warnings when only a subset of
//! helpers are used per file.

#![allow(dead_code)]

use listening_trainer::{App, MediaTransport};
use std::path::Path;
use tempfile::TempDir;

/// Media element stand-in that records what it was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeMedia {
    pub paused: bool,
    pub position: f64,
    pub duration: f64,
    pub seeks: Vec<f64>,
}

impl FakeMedia {
    /// A paused clip of `duration` seconds, positioned at `position`.
    pub fn at(position: f64, duration: f64) -> Self {
        Self {
            paused: true,
            position,
            duration,
            seeks: Vec::new(),
        }
    }
}

impl MediaTransport for FakeMedia {
    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
        self.seeks.push(seconds);
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

/// Provides test isolation with automatic resource cleanup.
///
/// The temporary directory is removed when the context is dropped, so keep
/// it alive until all store I/O has completed.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open an app on this context's directory, as a fresh process would.
    pub fn open(&self, media: FakeMedia) -> App<FakeMedia> {
        App::in_dir(self.path(), media)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
