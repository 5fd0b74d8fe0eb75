//! Off-thread filtering with a completion callback.
//!
//! [`spawn_filter`] moves the buffer onto the rayon pool, runs the row
//! parallel convolution there and hands the result to a callback on the
//! worker thread. There is no timeout.
//!
//! Cancelling a [`FilterTask`] only discards the eventual result: the
//! convolution still runs to completion, but the callback is skipped when
//! the cancel flag is set first.
//!
//! # Example
//!
//! ```rust
//! use std::sync::mpsc::channel;
//! use imgkit_core::{PixelBuffer, Rgba8};
//! use imgkit_ops::task::blur_bitmap_async;
//!
//! let (tx, rx) = channel();
//! let buf = PixelBuffer::filled(16, 16, Rgba8::opaque(40, 80, 120)).unwrap();
//! let _task = blur_bitmap_async(buf.clone(), 2, move |res| {
//!     let _ = tx.send(res);
//! })
//! .unwrap();
//! let blurred = rx.recv().unwrap().unwrap();
//! assert_eq!(blurred, buf);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use imgkit_core::PixelBuffer;
use tracing::{debug, trace};

use crate::kernels::BitmapFilter;
use crate::{parallel, OpsResult};

/// Handle to a filter running on the rayon pool.
#[derive(Debug, Clone)]
pub struct FilterTask {
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl FilterTask {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Drop the result when it arrives. Has no effect once finished.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True after [`FilterTask::cancel`].
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True once the computation has ended, whether or not the callback ran.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// Run `filter` over `buffer` on the rayon pool.
pub fn spawn_filter<F>(buffer: PixelBuffer, filter: BitmapFilter, on_complete: F) -> FilterTask
where
    F: FnOnce(OpsResult<PixelBuffer>) + Send + 'static,
{
    let task = FilterTask::new();
    let handle = task.clone();
    trace!(width = buffer.width(), height = buffer.height(), "spawn_filter");

    rayon::spawn(move || run(&handle, &buffer, &filter, on_complete));
    task
}

fn run<F>(handle: &FilterTask, buffer: &PixelBuffer, filter: &BitmapFilter, on_complete: F)
where
    F: FnOnce(OpsResult<PixelBuffer>),
{
    let result = parallel::apply_filter_buffer(buffer, filter);
    if handle.is_cancelled() {
        debug!("filter task cancelled, result discarded");
    } else {
        on_complete(result);
    }
    handle.finished.store(true, Ordering::SeqCst);
}

/// Box blur of the given radius, off-thread.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) when
/// `radius` exceeds [`MAX_BLUR_RADIUS`](crate::kernels::MAX_BLUR_RADIUS).
/// Nothing is spawned in that case.
pub fn blur_bitmap_async<F>(buffer: PixelBuffer, radius: u32, on_complete: F) -> OpsResult<FilterTask>
where
    F: FnOnce(OpsResult<PixelBuffer>) + Send + 'static,
{
    let filter = BitmapFilter::box_blur(radius)?;
    Ok(spawn_filter(buffer, filter, on_complete))
}
