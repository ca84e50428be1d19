//! Heap-delegating allocator
//!
//! A stateless passthrough to the global allocator. It exists so that a
//! container written against [`ElementAllocator`] can swap between the
//! process heap and a fixed arena without changing any of its logic.

use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;
use std::alloc;

use crate::error::{AllocError, AllocResult};
use crate::traits::{ElementAllocator, MemoryUsage};

/// Passthrough to the process heap.
///
/// Carries no state and no capacity limit; every block is an independent
/// heap allocation, so deallocation order does not matter here the way it
/// does for [`FixedLinearAllocator`](crate::FixedLinearAllocator).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    /// Creates a new heap passthrough. Zero-cost; the type holds nothing.
    #[inline]
    pub const fn new() -> Self {
        SystemAllocator
    }

    fn block_layout<T>(count: usize) -> AllocResult<Layout> {
        Layout::array::<T>(count).map_err(|_| AllocError::LayoutOverflow {
            elements: count,
            element_size: mem::size_of::<T>(),
        })
    }
}

impl<T> ElementAllocator<T> for SystemAllocator {
    type Rebound<U> = SystemAllocator;

    fn allocate(&mut self, count: usize) -> AllocResult<NonNull<T>> {
        let layout = Self::block_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: layout has non-zero size and comes from Layout::array.
        let raw = unsafe { alloc::alloc(layout) };
        NonNull::new(raw.cast()).ok_or(AllocError::StorageReservation {
            bytes: layout.size(),
        })
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) -> AllocResult<()> {
        let layout = Self::block_layout::<T>(count)?;
        if layout.size() != 0 {
            // SAFETY: caller guarantees ptr was returned by allocate on
            // this allocator with the same count, so the layout matches.
            unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
        }
        Ok(())
    }

    fn rebind<U>(&self) -> AllocResult<SystemAllocator> {
        Ok(SystemAllocator)
    }
}

// The heap has no fixed limit and nothing is tracked per instance.
impl MemoryUsage for SystemAllocator {
    fn used_memory(&self) -> usize {
        0
    }

    fn available_memory(&self) -> Option<usize> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_write_deallocate() {
        let mut heap = SystemAllocator::new();
        let ptr: NonNull<u64> = heap.allocate(4).unwrap();

        unsafe {
            for i in 0..4 {
                ptr.as_ptr().add(i).write(i as u64);
            }
            assert_eq!(ptr.as_ptr().add(3).read(), 3);
            heap.deallocate(ptr, 4).unwrap();
        }
    }

    #[test]
    fn zero_count_returns_dangling() {
        let mut heap = SystemAllocator::new();
        let ptr: NonNull<u32> = heap.allocate(0).unwrap();
        unsafe { heap.deallocate(ptr, 0).unwrap() };
    }

    #[test]
    fn construct_and_destruct() {
        let mut heap = SystemAllocator::new();
        let ptr: NonNull<String> = heap.allocate(1).unwrap();

        unsafe {
            heap.construct(ptr, String::from("hello"));
            assert_eq!(&*ptr.as_ptr(), "hello");
            heap.destruct(ptr);
            heap.deallocate(ptr, 1).unwrap();
        }
    }

    #[test]
    fn rebind_is_trivial() {
        let heap = SystemAllocator::new();
        let mut rebound: SystemAllocator =
            <SystemAllocator as ElementAllocator<u8>>::rebind::<u64>(&heap).unwrap();
        let ptr: NonNull<u64> = rebound.allocate(1).unwrap();
        unsafe { rebound.deallocate(ptr, 1).unwrap() };
    }
}
