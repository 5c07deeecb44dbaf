//! Shortcut data types.

mod action;
mod binding;

pub use action::Action;
pub use binding::{Binding, Modifiers};
