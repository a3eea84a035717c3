//! Shared identifier types

pub mod action;
pub mod identity;
pub mod resource;

pub use action::ActionSelector;
pub use identity::Identity;
pub use resource::ResourceId;
