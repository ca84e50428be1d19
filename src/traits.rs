//! The allocator interface contract consumed by node-based containers
//!
//! Containers that allocate fixed-size node blocks one element at a time
//! depend only on the capability set defined here, never on a concrete
//! allocator type. That keeps the allocation strategy substitutable: a
//! heap passthrough and a fixed arena are interchangeable as long as both
//! honor the contract.
//!
//! The split of responsibilities is strict: [`ElementAllocator::allocate`]
//! and [`ElementAllocator::deallocate`] are the only operations that move
//! storage in or out of the free pool. [`ElementAllocator::construct`] and
//! [`ElementAllocator::destruct`] run the element lifecycle in place and
//! never touch the accounting.

use core::ptr::{self, NonNull};

use crate::error::AllocResult;

/// Allocation capability set for a single element type.
///
/// Two allocator instances are interchangeable for a given allocation only
/// if they are the same concrete type with the same configuration. The
/// contract does not support polymorphic mixing across implementations.
pub trait ElementAllocator<T> {
    /// The same allocation strategy configured for element type `U`.
    ///
    /// Every non-type configuration parameter (a fixed capacity, for
    /// instance) carries over, so a container requesting memory for its
    /// internal node representation gets a pool sized consistently with
    /// the original intent.
    type Rebound<U>: ElementAllocator<U>;

    /// Reserves uninitialized memory for `count` elements.
    ///
    /// The returned memory is not zeroed or initialized; it must be
    /// initialized (for example via [`construct`](Self::construct))
    /// before being read.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be satisfied. A failed call leaves the
    /// allocator's state untouched, so the caller can react (abandon an
    /// insert, say) and keep using the allocator.
    fn allocate(&mut self, count: usize) -> AllocResult<NonNull<T>>;

    /// Returns memory previously obtained from [`allocate`](Self::allocate)
    /// back to the allocator.
    ///
    /// # Safety
    ///
    /// - `ptr` and `count` must match a prior `allocate` call on this
    ///   instance exactly.
    /// - No element in the block may still need finalization; run
    ///   [`destruct`](Self::destruct) first.
    /// - The block must not be accessed after this call.
    ///
    /// Implementations may impose ordering requirements on top of this
    /// (see [`FixedLinearAllocator`](crate::FixedLinearAllocator) and its
    /// stack-discipline precondition).
    ///
    /// # Errors
    ///
    /// Fails if the return cannot be accounted for (a double free or a
    /// mismatched count). Rejected calls leave the accounting untouched.
    unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) -> AllocResult<()>;

    /// Initializes one element in place at `ptr`.
    ///
    /// Never allocates and never touches the free/used accounting.
    ///
    /// # Safety
    ///
    /// `ptr` must point into a block obtained from
    /// [`allocate`](Self::allocate) on this instance, and the slot must
    /// not already hold a live element.
    unsafe fn construct(&self, ptr: NonNull<T>, value: T) {
        // SAFETY: caller guarantees ptr is a valid, properly aligned slot
        // from this allocator with no live element in it.
        unsafe { ptr.as_ptr().write(value) }
    }

    /// Finalizes the element at `ptr` without freeing its memory.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live element previously initialized via
    /// [`construct`](Self::construct) (or equivalent), and the element
    /// must not be used again after this call.
    unsafe fn destruct(&self, ptr: NonNull<T>) {
        // SAFETY: caller guarantees ptr points to a live, initialized
        // element owned by this allocator.
        unsafe { ptr::drop_in_place(ptr.as_ptr()) }
    }

    /// Produces an independent allocator of the same strategy for
    /// element type `U`.
    ///
    /// # Errors
    ///
    /// Fails if the rebound instance needs backing storage of its own and
    /// that storage cannot be reserved.
    fn rebind<U>(&self) -> AllocResult<Self::Rebound<U>>;
}

/// Byte-level memory accounting exposed by allocators that track it.
pub trait MemoryUsage {
    /// Bytes currently handed out.
    fn used_memory(&self) -> usize;

    /// Bytes still available, if the allocator has a known limit.
    fn available_memory(&self) -> Option<usize>;

    /// Total byte capacity, if known.
    fn total_memory(&self) -> Option<usize> {
        self.available_memory()
            .map(|available| self.used_memory() + available)
    }
}
