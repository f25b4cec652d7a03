//! Reusable append-only character buffers.
//!
//! A process-wide pool keeps the per-token allocation cost of the string
//! buffer bounded: a tokenizer takes a buffer on construction and returns it
//! when dropped, so repeated tokenizer instances reuse grown capacity.

use std::sync::Mutex;

/// Buffers kept around once returned; anything beyond this is freed.
const MAX_POOLED: usize = 16;

static POOL: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Take a cleared buffer from the pool, or allocate a fresh one.
pub(crate) fn acquire() -> String {
    POOL.lock().ok().and_then(|mut pool| pool.pop()).unwrap_or_default()
}

/// Return a buffer to the pool. Buffers that never grew are not worth keeping.
pub(crate) fn release(mut buffer: String) {
    buffer.clear();
    if buffer.capacity() == 0 {
        return;
    }
    if let Ok(mut pool) = POOL.lock() {
        if pool.len() < MAX_POOLED {
            pool.push(buffer);
        }
    }
}
