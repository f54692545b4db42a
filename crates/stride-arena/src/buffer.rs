//! Contiguous byte storage backing a struct array.
//!
//! A [`Buffer`] is either owned (a zero-initialised `Vec<u8>` freed with the
//! array) or borrowed from a caller who keeps ownership. The borrow is a
//! plain `&mut [u8]`, so the compiler enforces that the caller's storage
//! outlives every array built on it.

/// Raw record storage, owned or borrowed.
#[derive(Debug)]
pub enum Buffer<'a> {
    /// Allocated and freed by the array.
    Owned(Vec<u8>),
    /// Lent by the caller; never freed or reallocated by the array.
    Borrowed(&'a mut [u8]),
}

impl Buffer<'static> {
    /// Allocate a zero-initialised owned buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Buffer::Owned(vec![0; len])
    }
}

impl<'a> Buffer<'a> {
    /// Wrap caller-owned storage.
    pub fn borrowed(bytes: &'a mut [u8]) -> Self {
        Buffer::Borrowed(bytes)
    }

    /// Capacity in bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the buffer holds zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the storage belongs to the caller.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Buffer::Borrowed(_))
    }

    /// Shared view of the bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Owned(bytes) => bytes,
            Buffer::Borrowed(bytes) => bytes,
        }
    }

    /// Exclusive view of the bytes.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Buffer::Owned(bytes) => bytes,
            Buffer::Borrowed(bytes) => bytes,
        }
    }

    /// Copy the contents into a new owned buffer.
    pub fn to_owned_buffer(&self) -> Buffer<'static> {
        Buffer::Owned(self.as_slice().to_vec())
    }

    /// Change the capacity to `len` bytes, keeping the common prefix and
    /// zero-filling any new tail.
    ///
    /// Owned storage is resized in place (which may relocate it). Borrowed
    /// storage is copied into a fresh owned allocation and the caller's
    /// slice is left untouched.
    pub(crate) fn reallocate(&mut self, len: usize) {
        match self {
            Buffer::Owned(bytes) => {
                bytes.resize(len, 0);
                bytes.shrink_to_fit();
            }
            Buffer::Borrowed(bytes) => {
                let keep = bytes.len().min(len);
                let mut next = vec![0; len];
                next[..keep].copy_from_slice(&bytes[..keep]);
                *self = Buffer::Owned(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_is_owned_and_zero() {
        let buf = Buffer::zeroed(16);
        assert_eq!(buf.len(), 16);
        assert!(!buf.is_borrowed());
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn owned_reallocate_keeps_prefix() {
        let mut buf = Buffer::zeroed(4);
        buf.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
        buf.reallocate(6);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 0, 0]);
        buf.reallocate(2);
        assert_eq!(buf.as_slice(), &[1, 2]);
    }

    #[test]
    fn borrowed_reallocate_detaches() {
        let mut storage = [7u8; 4];
        {
            let mut buf = Buffer::borrowed(&mut storage);
            assert!(buf.is_borrowed());
            buf.reallocate(8);
            assert!(!buf.is_borrowed());
            buf.as_mut_slice()[0] = 9;
            assert_eq!(buf.as_slice(), &[9, 7, 7, 7, 0, 0, 0, 0]);
        }
        assert_eq!(storage, [7; 4]);
    }
}
