/// Offscreen pixel buffers and the allocators that hand them out
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use log::trace;
use sha2::{Digest, Sha256};

use crate::rendering::{Bounds, Color};
use crate::{Error, Result};

/// A row-major grid of colors. New and recycled buffers start fully
/// `TRANSPARENT`, so every pixel holds a defined value before any read.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full extent of the buffer as paint bounds
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width as i32, self.height as i32)
    }

    /// One row of pixels, left to right.
    ///
    /// Panics if `y` is out of range.
    pub fn row(&self, y: u32) -> &[Color] {
        assert!(y < self.height, "row {} out of range for height {}", y, self.height);
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // chunks_exact(0) panics; a zero-width buffer has no rows worth yielding
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Write a single pixel; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Replace every pixel inside `rect` (clipped to the buffer) with `color`.
    pub fn fill_rect(&mut self, rect: Bounds, color: Color) {
        let Some(clip) = rect.intersect(&self.bounds()) else {
            return;
        };
        let stride = self.width as usize;
        for y in clip.top..clip.bottom {
            let start = y as usize * stride;
            self.pixels[start + clip.left as usize..start + clip.right as usize].fill(color);
        }
    }

    /// Resize in place, keeping the allocation when it is large enough, and
    /// clear to `TRANSPARENT`.
    fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Color::TRANSPARENT);
    }

    /// SHA-256 over the dimensions and packed ARGB pixels, hex encoded.
    pub fn digest_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_be_bytes());
        hasher.update(self.height.to_be_bytes());
        for px in &self.pixels {
            hasher.update(px.to_argb().to_be_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Source of offscreen buffers. Every buffer obtained from `allocate` must be
/// handed back through `release`; use [`ScopedBuffer`] to guarantee that.
pub trait SurfaceAllocator {
    fn allocate(&self, width: u32, height: u32) -> Result<PixelBuffer>;
    fn release(&self, buffer: PixelBuffer);
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height));
    }
    Ok(())
}

/// Allocates a fresh buffer per request; release simply drops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl SurfaceAllocator for HeapAllocator {
    fn allocate(&self, width: u32, height: u32) -> Result<PixelBuffer> {
        check_size(width, height)?;
        Ok(PixelBuffer::new(width, height))
    }

    fn release(&self, buffer: PixelBuffer) {
        drop(buffer);
    }
}

/// Keeps released buffers on a free list and hands them out again.
#[derive(Debug, Default)]
pub struct PooledAllocator {
    free: Mutex<Vec<PixelBuffer>>,
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl PooledAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of successful `allocate` calls
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    /// Total number of `release` calls
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Buffers handed out and not yet released
    pub fn outstanding(&self) -> usize {
        self.allocated().saturating_sub(self.released())
    }

    /// Buffers currently waiting on the free list
    pub fn pooled(&self) -> usize {
        self.free.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl SurfaceAllocator for PooledAllocator {
    fn allocate(&self, width: u32, height: u32) -> Result<PixelBuffer> {
        check_size(width, height)?;
        let recycled = self.free.lock().unwrap_or_else(|e| e.into_inner()).pop();
        let buffer = match recycled {
            Some(mut buf) => {
                trace!("reusing pooled buffer for {}x{}", width, height);
                buf.reset(width, height);
                buf
            }
            None => PixelBuffer::new(width, height),
        };
        self.allocated.fetch_add(1, Ordering::SeqCst);
        Ok(buffer)
    }

    fn release(&self, buffer: PixelBuffer) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.free
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(buffer);
    }
}

/// A buffer on loan from an allocator. It goes back in `Drop`, which covers
/// normal returns, early returns, `?` propagation and unwinding alike.
pub struct ScopedBuffer<'a, A: SurfaceAllocator + ?Sized> {
    buffer: PixelBuffer,
    allocator: &'a A,
}

impl<'a, A: SurfaceAllocator + ?Sized> ScopedBuffer<'a, A> {
    pub fn allocate(allocator: &'a A, width: u32, height: u32) -> Result<Self> {
        let buffer = allocator.allocate(width, height)?;
        trace!("allocated {}x{} buffer", width, height);
        Ok(Self { buffer, allocator })
    }
}

impl<A: SurfaceAllocator + ?Sized> Deref for ScopedBuffer<'_, A> {
    type Target = PixelBuffer;

    fn deref(&self) -> &PixelBuffer {
        &self.buffer
    }
}

impl<A: SurfaceAllocator + ?Sized> DerefMut for ScopedBuffer<'_, A> {
    fn deref_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }
}

impl<A: SurfaceAllocator + ?Sized> Drop for ScopedBuffer<'_, A> {
    fn drop(&mut self) {
        // 0x0 placeholder, no heap allocation
        let buffer = std::mem::replace(&mut self.buffer, PixelBuffer::new(0, 0));
        trace!("releasing {}x{} buffer", buffer.width(), buffer.height());
        self.allocator.release(buffer);
    }
}
