use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::core::Viewport;

/// Number of consecutive raster-order pixels guarded by one lock cell.
pub const PIXELS_PER_LOCK: usize = 16;
/// Alignment of a lock cell; adjacent cells never share a cache line.
pub const CACHE_LINE_SIZE: usize = 64;

#[repr(align(64))]
#[derive(Default)]
struct LockCell {
    locked: AtomicBool,
}

const _: () = assert!(std::mem::align_of::<LockCell>() == CACHE_LINE_SIZE);

impl LockCell {
    fn acquire(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
    }

    fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

/// Spinlocks serializing read-modify-write of frame target pixels.
///
/// Cell `(width * y + x) / PIXELS_PER_LOCK` covers pixel `(x, y)`. Critical sections are a
/// single depth compare plus two stores, so waiting threads spin instead of parking.
pub struct PixelLockTable {
    width: usize,
    cells: Box<[LockCell]>,
}

impl PixelLockTable {
    /// Allocate enough cells to cover every pixel of `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        let count = viewport.area().div_ceil(PIXELS_PER_LOCK);
        Self {
            width: viewport.width as usize,
            cells: (0..count).map(|_| LockCell::default()).collect(),
        }
    }

    /// Number of lock cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when the table has no cells (never the case for a valid viewport).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the cell covering pixel `(x, y)`.
    pub fn index(&self, x: u32, y: u32) -> usize {
        (self.width * y as usize + x as usize) / PIXELS_PER_LOCK
    }

    /// Spin until the cell covering `(x, y)` is acquired; the guard releases it on drop.
    pub fn lock(&self, x: u32, y: u32) -> PixelGuard<'_> {
        let cell = &self.cells[self.index(x, y)];
        cell.acquire();
        PixelGuard { cell }
    }

    /// Acquire the cell covering `(x, y)` only if it is free.
    pub fn try_lock(&self, x: u32, y: u32) -> Option<PixelGuard<'_>> {
        let cell = &self.cells[self.index(x, y)];
        cell.try_acquire().then(|| PixelGuard { cell })
    }
}

/// Held lock on one pixel block.
#[must_use = "the pixel block is unlocked as soon as the guard is dropped"]
pub struct PixelGuard<'a> {
    cell: &'a LockCell,
}

impl Drop for PixelGuard<'_> {
    fn drop(&mut self) {
        self.cell.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/target/lock.rs"]
mod tests;
