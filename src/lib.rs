//! Fixed-capacity linear allocation for node-based containers
//!
//! This crate provides a small allocation contract for containers that
//! allocate fixed-size node blocks one element at a time, plus two
//! implementations of it:
//!
//! - [`FixedLinearAllocator`]: a bump allocator over an arena of exactly
//!   `N` elements, with element-count accounting and stack-order
//!   (LIFO) reclamation
//! - [`SystemAllocator`]: a stateless passthrough to the process heap
//!
//! The contract ([`ElementAllocator`]) separates memory movement
//! (`allocate`/`deallocate`) from the element lifecycle
//! (`construct`/`destruct`) and includes a rebinding operation so a
//! container can request an allocator for its internal node type while
//! preserving the configured capacity.
//!
//! # Example
//!
//! The pattern a keyed container follows per entry:
//!
//! ```
//! use fixed_bump::{AllocResult, ElementAllocator, FixedLinearAllocator};
//!
//! fn main() -> AllocResult<()> {
//!     // The container rebinds to its node type at construction time.
//!     let value_alloc = FixedLinearAllocator::<(i32, i32), 20>::new()?;
//!     let mut node_alloc = value_alloc.rebind::<(i32, i32, u8)>()?;
//!
//!     // Insert: allocate one node, then construct in place.
//!     let node = node_alloc.allocate(1)?;
//!     unsafe { node_alloc.construct(node, (1, 1, 0)) };
//!
//!     // Remove: destruct, then deallocate in reverse order.
//!     unsafe {
//!         node_alloc.destruct(node);
//!         node_alloc.deallocate(node, 1)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod linear;
pub mod system;
pub mod traits;

pub use error::{AllocError, AllocResult};
pub use linear::FixedLinearAllocator;
pub use system::SystemAllocator;
pub use traits::{ElementAllocator, MemoryUsage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
