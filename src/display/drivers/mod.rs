// src/display/drivers/mod.rs
//! Presenter implementations.

pub mod headless;
pub mod mock;

pub use headless::{HeadlessPresenter, PresentStats};
pub use mock::MockPresenter;
