use crate::types::DataType;

/// One attribute of an interleaved vertex layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub ty: DataType,
    /// Number of components, 1 to 4.
    pub count: u8,
    pub normalized: bool,
}

impl VertexAttribute {
    #[inline]
    pub const fn new(ty: DataType, count: u8) -> Self {
        Self {
            ty,
            count,
            normalized: false,
        }
    }

    #[inline]
    pub const fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Size of the attribute in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> u32 {
        self.ty.size_in_bytes() * self.count as u32
    }
}

impl Default for VertexAttribute {
    fn default() -> Self {
        Self::new(DataType::Float, 4)
    }
}
