//! Generic fixed-capacity circular queue for CAN frames.
//!
//! Storage is reserved inline through const generics, so a queue never
//! allocates. All operations are capacity-bounded truncations: a push beyond
//! the free space or a pop from an empty queue is reported through the
//! returned count, never through an error.

/// Circular FIFO with separate read and write indices and an occupancy count.
pub(crate) struct RingBuffer<T: Copy, const N: usize> {
    /// Backing store
    storage: [T; N],
    /// Index of the oldest record
    read: usize,
    /// Index of the next free slot
    write: usize,
    /// Number of occupied slots (`0..=N`)
    occupied: usize,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Create an empty queue with every slot set to `fill`
    pub(crate) const fn new(fill: T) -> Self {
        const { assert!(N > 0, "ring buffer capacity must be non-zero") };
        Self {
            storage: [fill; N],
            read: 0,
            write: 0,
            occupied: 0,
        }
    }

    /// Number of slots
    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        N
    }

    /// Number of occupied slots
    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.occupied
    }

    /// Number of free slots
    #[inline(always)]
    pub(crate) const fn available(&self) -> usize {
        self.capacity() - self.occupied
    }

    #[inline(always)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline(always)]
    pub(crate) const fn is_full(&self) -> bool {
        self.occupied == N
    }

    /// Copy in as many of `items` as fit, in order. Returns the accepted count.
    pub(crate) fn push(&mut self, items: &[T]) -> usize {
        let count = items.len().min(self.available());
        for item in &items[..count] {
            self.storage[self.write] = *item;
            self.write = (self.write + 1) % N;
        }
        self.occupied += count;
        count
    }

    /// Push a single record. Returns `false` if the queue is full.
    pub(crate) fn push_one(&mut self, item: T) -> bool {
        self.push(core::slice::from_ref(&item)) == 1
    }

    /// Move up to `out.len()` of the oldest records into `out`.
    /// Returns the number of records written.
    pub(crate) fn pop(&mut self, out: &mut [T]) -> usize {
        let count = out.len().min(self.occupied);
        for slot in &mut out[..count] {
            *slot = self.storage[self.read];
            self.read = (self.read + 1) % N;
        }
        self.occupied -= count;
        count
    }

    /// Remove and return the oldest record
    pub(crate) fn pop_one(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.storage[self.read];
        self.read = (self.read + 1) % N;
        self.occupied -= 1;
        Some(item)
    }

    /// Logically discard all records. The backing store is left untouched.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.read = self.write;
        self.occupied = 0;
    }
}

// =============================================================================
// Tests
// =============================================================================
