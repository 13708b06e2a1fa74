//! Rendering surface contract and the default container tree.

mod core;

pub use core::{ContainerTree, NodeData, NodeHandle, NodeKind, Surface};
