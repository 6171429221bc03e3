//! new-joiners-widget: an embeddable profile-list widget for content platforms
//!
//! This library provides everything the hosting platform needs to carry the
//! widget:
//! - The block host contract: definitions, factories, elements and the
//!   registry the host resolves element names against
//! - Declarative configuration-dialog schemas
//! - The new-joiners widget itself: attribute parsing, start-date
//!   windowing and the presentational view

pub mod core;
pub mod schema;
pub mod widget;

// Re-export commonly used types
pub use crate::core::{
    Block, BlockDefinition, Container, Element, ExternalBlockDefinition, WidgetApi,
};
pub use crate::widget::{register, NewJoinersBlock, WIDGET_ATTRIBUTES, WIDGET_NAME};
