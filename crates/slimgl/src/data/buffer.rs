/// Byte range inside a buffer's allocation.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BufferMemoryRange {
    pub offset: u64,
    pub size: u64,
}

impl BufferMemoryRange {
    #[inline]
    pub const fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// One past the last byte covered by the range.
    #[inline]
    pub const fn end(self) -> u64 {
        self.offset.saturating_add(self.size)
    }

    /// True if the range lies entirely inside an allocation of `allocated` bytes.
    #[inline]
    pub const fn fits_in(self, allocated: u64) -> bool {
        self.end() <= allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_fits_exactly() {
        assert!(BufferMemoryRange::new(16, 16).fits_in(32));
    }

    #[test]
    fn range_past_allocation_does_not_fit() {
        assert!(!BufferMemoryRange::new(17, 16).fits_in(32));
    }

    #[test]
    fn end_saturates() {
        assert_eq!(BufferMemoryRange::new(u64::MAX, 4).end(), u64::MAX);
    }
}
