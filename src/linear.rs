//! Fixed-capacity linear (bump) allocator
//!
//! Serves up to `N` total elements of type `T` from a single arena
//! reserved once at construction, using pure pointer-bump allocation:
//! no search, no free list, O(1) allocate and deallocate.
//!
//! # Memory layout
//! ```text
//! [start]----[block1]----[block2]----[cursor]----[free]----[end]
//!             <----- allocated ----->           <- remaining ->
//! ```
//!
//! # Stack discipline
//!
//! Deallocations must arrive in exact reverse (LIFO) order relative to
//! allocations, and the pointer passed to [`deallocate`] must always be
//! the block most recently returned by [`allocate`]. The allocator keeps
//! no free list and does not validate pointers: violating the order
//! silently corrupts the cursor (it stops pointing at the boundary
//! between used and free memory) without any detectable error. This is a
//! documented precondition, not a defined failure mode; it is the price
//! of the no-free-list O(1) design.
//!
//! The one misuse that *is* detected is over-returning: a deallocation
//! that would push the free count above `N` is rejected with
//! [`AllocError::AccountingOverflow`] and leaves the accounting intact.
//!
//! [`allocate`]: FixedLinearAllocator::allocate
//! [`deallocate`]: FixedLinearAllocator::deallocate

use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};
use std::alloc::{self, Layout};

use tracing::{debug, trace, warn};

use crate::error::{AllocError, AllocResult};
use crate::traits::{ElementAllocator, MemoryUsage};

/// Bump allocator over a fixed arena of `N` elements of `T`.
///
/// The arena is reserved (zeroed) once when the allocator is constructed
/// and released exactly once when it is dropped. Exhaustion is a per-call
/// failure, not a terminal state: a failed [`allocate`] leaves the
/// allocator untouched and a matching [`deallocate`] makes the capacity
/// available again.
///
/// All outstanding blocks become invalid when the allocator is dropped;
/// leaks are neither tracked nor reported.
///
/// # Examples
/// ```
/// use fixed_bump::{ElementAllocator, FixedLinearAllocator};
///
/// let mut arena = FixedLinearAllocator::<u64, 20>::new()?;
/// let ptr = arena.allocate(1)?;
/// unsafe {
///     arena.construct(ptr, 42);
///     assert_eq!(*ptr.as_ptr(), 42);
///     arena.destruct(ptr);
///     arena.deallocate(ptr, 1)?;
/// }
/// # Ok::<(), fixed_bump::AllocError>(())
/// ```
///
/// [`allocate`]: FixedLinearAllocator::allocate
/// [`deallocate`]: FixedLinearAllocator::deallocate
pub struct FixedLinearAllocator<T, const N: usize> {
    /// Exclusively owned arena of `N * size_of::<T>()` bytes. Dangling
    /// when the arena layout is zero-sized.
    storage: NonNull<u8>,
    /// Element index of the next free slot; advances on allocate,
    /// retreats on deallocate.
    cursor: usize,
    /// Elements still allocatable. Invariant: `cursor + remaining == N`.
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<T, const N: usize> FixedLinearAllocator<T, N> {
    /// Reserves the arena and returns a ready allocator.
    ///
    /// The arena bytes start zeroed. Construction is atomic: on error no
    /// partially usable allocator exists.
    ///
    /// # Errors
    ///
    /// [`AllocError::LayoutOverflow`] if `N * size_of::<T>()` cannot be
    /// expressed as a valid layout, [`AllocError::StorageReservation`] if
    /// the underlying memory request fails.
    pub fn new() -> AllocResult<Self> {
        let layout = Self::arena_layout()?;

        let storage = if layout.size() == 0 {
            // Zero-sized arena (ZST elements or N == 0): nothing to
            // reserve, a well-aligned dangling pointer stands in.
            NonNull::<T>::dangling().cast()
        } else {
            // SAFETY: layout has non-zero size and was validated by
            // Layout::array above.
            let raw = unsafe { alloc::alloc_zeroed(layout) };
            NonNull::new(raw).ok_or(AllocError::StorageReservation {
                bytes: layout.size(),
            })?
        };

        trace!(
            capacity = N,
            bytes = layout.size(),
            "reserved fixed arena"
        );

        Ok(Self {
            storage,
            cursor: 0,
            remaining: N,
            _marker: PhantomData,
        })
    }

    /// Total element capacity of the arena.
    #[inline]
    pub fn capacity(&self) -> usize {
        N
    }

    /// Elements currently handed out.
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Elements still allocatable.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn arena_layout() -> AllocResult<Layout> {
        Layout::array::<T>(N).map_err(|_| AllocError::LayoutOverflow {
            elements: N,
            element_size: mem::size_of::<T>(),
        })
    }

    fn slot_ptr(&self, index: usize) -> NonNull<T> {
        if mem::size_of::<T>() == 0 {
            return NonNull::dangling();
        }
        // SAFETY: index <= N by the cursor invariant, so the offset stays
        // within (or one past) the reserved arena.
        unsafe { NonNull::new_unchecked(self.storage.as_ptr().cast::<T>().add(index)) }
    }

    /// Reserves uninitialized memory for `count` elements at the cursor.
    ///
    /// The returned block is not zeroed or initialized.
    ///
    /// # Errors
    ///
    /// [`AllocError::CapacityExhausted`] if `count` exceeds the remaining
    /// capacity; the cursor and the free count are left untouched.
    pub fn allocate(&mut self, count: usize) -> AllocResult<NonNull<T>> {
        if count > self.remaining {
            debug!(
                requested = count,
                remaining = self.remaining,
                "fixed arena capacity exhausted"
            );
            return Err(AllocError::CapacityExhausted {
                requested: count,
                remaining: self.remaining,
            });
        }

        let block = self.slot_ptr(self.cursor);
        self.cursor += count;
        self.remaining -= count;
        Ok(block)
    }

    /// Returns the most recently allocated block to the arena.
    ///
    /// The returned bytes are zeroed before the cursor retreats, which
    /// helps surface use-after-free bugs in testing.
    ///
    /// # Safety
    ///
    /// `ptr` must be the block most recently returned by
    /// [`allocate`](Self::allocate) on this instance, with the same
    /// `count`, and no element in it may still be live. Returning any
    /// other block violates the stack discipline described in the module
    /// docs and corrupts the cursor without a detectable error.
    ///
    /// # Errors
    ///
    /// [`AllocError::AccountingOverflow`] if the return would push the
    /// free count above `N` (an over-return the accounting can catch);
    /// the rejected call mutates nothing.
    pub unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) -> AllocResult<()> {
        // remaining + count > N, rearranged so huge counts cannot
        // overflow the addition.
        if count > self.cursor {
            warn!(count, capacity = N, "rejected over-returning deallocation");
            return Err(AllocError::AccountingOverflow { count, capacity: N });
        }

        // SAFETY: caller guarantees ptr/count name the most recent live
        // block, which lies entirely within the arena.
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, count) };

        self.cursor -= count;
        self.remaining += count;
        Ok(())
    }
}

impl<T, const N: usize> ElementAllocator<T> for FixedLinearAllocator<T, N> {
    /// An independent arena of `N` elements of `U`. Rebinding preserves
    /// the capacity but never shares storage: each rebound instance
    /// reserves its own pool sized in units of `U`.
    type Rebound<U> = FixedLinearAllocator<U, N>;

    fn allocate(&mut self, count: usize) -> AllocResult<NonNull<T>> {
        FixedLinearAllocator::allocate(self, count)
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) -> AllocResult<()> {
        // SAFETY: forwarded contract; caller upholds the stack-discipline
        // precondition documented on the inherent method.
        unsafe { FixedLinearAllocator::deallocate(self, ptr, count) }
    }

    fn rebind<U>(&self) -> AllocResult<FixedLinearAllocator<U, N>> {
        FixedLinearAllocator::new()
    }
}

impl<T, const N: usize> MemoryUsage for FixedLinearAllocator<T, N> {
    fn used_memory(&self) -> usize {
        self.cursor * mem::size_of::<T>()
    }

    fn available_memory(&self) -> Option<usize> {
        Some(self.remaining * mem::size_of::<T>())
    }
}

impl<T, const N: usize> fmt::Debug for FixedLinearAllocator<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedLinearAllocator")
            .field("capacity", &N)
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<T, const N: usize> Drop for FixedLinearAllocator<T, N> {
    fn drop(&mut self) {
        if let Ok(layout) = Self::arena_layout() {
            if layout.size() != 0 {
                // SAFETY: storage was reserved with this exact layout in
                // new() and is released exactly once, here.
                unsafe { alloc::dealloc(self.storage.as_ptr(), layout) };
            }
        }
    }
}

// SAFETY: the arena is exclusively owned by this instance; the raw
// storage pointer is the only reason the auto impls do not apply.
unsafe impl<T: Send, const N: usize> Send for FixedLinearAllocator<T, N> {}
// SAFETY: every mutation goes through &mut self, so shared references
// only ever observe the accounting fields.
unsafe impl<T: Sync, const N: usize> Sync for FixedLinearAllocator<T, N> {}
