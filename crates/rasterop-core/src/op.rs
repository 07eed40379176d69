//! ImageOp - Buffer-to-buffer operation capability
//!
//! Every engine that maps one whole image to another (dithering, indexing,
//! resampling, block averaging) implements [`ImageOp`], so callers can hold
//! heterogeneous operations behind one interface and chain them.

use crate::buffer::PixelBuffer;

/// An operation producing a new buffer from a source buffer.
///
/// Implementations never modify `src`.
pub trait ImageOp {
    /// Error returned when the source cannot be processed.
    type Error;

    /// Apply the operation to `src`.
    fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer, Self::Error>;
}

/// Apply a sequence of operations sharing one error type, left to right.
pub fn apply_chain<E>(src: &PixelBuffer, ops: &[&dyn ImageOp<Error = E>]) -> Result<PixelBuffer, E> {
    let mut current = src.clone();
    for op in ops {
        current = op.apply(&current)?;
    }
    Ok(current)
}
