//! The layout tree
//!
//! - `node` - tree nodes: style, children, callbacks, dirty tracking,
//!   copy-on-write child ownership
//! - `layout` - per-node computed layout and its measurement cache slots

pub mod layout;
pub mod node;

pub use layout::Layout;
pub use node::Node;
