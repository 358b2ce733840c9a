use num_traits::{PrimInt, ToPrimitive};

pub mod macros;

/// Trait for integer types which can address an element of a wrapping array.
///
/// Indices are reduced modulo the array length, so `len` addresses element 0 again. Negative
/// indices count back from the end (`-1` is the last element).
pub trait WrapIndex: PrimInt + std::fmt::Debug + 'static {
    /// Reduce `self` into `0..len`.
    ///
    /// Returns `None` if `len == 0`, since there is nothing to wrap onto.
    #[inline]
    fn wrap(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self.to_i128() {
            Some(i) => Some(i.rem_euclid(len as i128) as usize),
            // only reachable for u128 values above i128::MAX
            None => Some((self.to_u128()? % len as u128) as usize),
        }
    }
}
impl<P> WrapIndex for P where P: PrimInt + std::fmt::Debug + 'static {}
