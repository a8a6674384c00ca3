// src/display/mod.rs
//! Frame presentation.
//!
//! - Presenter: the trait the accumulator hands completed frames to
//! - drivers: headless and mock presenters

pub mod drivers;
pub mod presenter;

pub use drivers::{HeadlessPresenter, MockPresenter, PresentStats};
pub use presenter::Presenter;
