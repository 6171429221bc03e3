//! Core traits and types of the block host contract

mod base_block;
mod block;
mod element;
mod registry;
mod widget_api;

pub use base_block::{AttributeMap, BaseBlock};
pub use block::{
    Block, BlockDefinition, BlockFactory, BlockLevel, BoxedBlock, Container,
    ExternalBlockDefinition,
};
pub use element::Element;
pub use registry::{create_element, define_block, with_registry, BlockRegistry, RegistryError};
pub use widget_api::{DataState, StaticDirectory, UserProfile, WidgetApi};
