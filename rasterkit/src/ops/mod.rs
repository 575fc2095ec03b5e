//! Elementwise helpers for building masks, stacks and derived layers around
//! the labeling and indexing routines.

pub mod buffer_kernel;
pub mod mask;
pub mod prewitt;
pub mod select;
pub mod stack;
pub mod stretch;

pub use buffer_kernel::make_buffer_kernel;
pub use mask::{and_all, or_all, pix_in_list};
pub use prewitt::{conv_cols, conv_rows, prewitt};
pub use select::{stack_where, Layers};
pub use stack::{make_stack, StackPart};
pub use stretch::stretch;
