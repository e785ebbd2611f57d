use std::rc::Rc;

use bytemuck::Pod;

use crate::backend::{Backend, NativeId};
use crate::context::Context;
use crate::data::BufferMemoryRange;
use crate::types::{AccessSpecifier, BufferType};

/// GPU buffer: vertex, index, uniform or shader storage data.
///
/// Allocation and upload are separate steps. `allocate` reserves storage,
/// `upload` writes into it.
pub struct Buffer {
    backend: Rc<dyn Backend>,
    id: NativeId,
    allocated_bytes: u64,
    bound_as: Option<BufferType>,
}

impl Buffer {
    pub fn new(context: &Context) -> Self {
        let backend = context.backend();
        let id = backend.create_buffer();
        log::trace!("buffer {id} created");

        Self {
            backend,
            id,
            allocated_bytes: 0,
            bound_as: None,
        }
    }

    /// Reserves `size` bytes (previous contents are discarded). Returns the allocated size.
    pub fn allocate(&mut self, size: u64, usage: AccessSpecifier) -> u64 {
        debug_assert!(self.is_valid(), "cannot allocate memory for an invalid buffer");
        debug_assert!(
            size <= i32::MAX as u64,
            "buffer size {size} exceeds the 2 GiB allocation limit"
        );
        self.backend.buffer_storage(self.id, size, usage);
        self.allocated_bytes = size;
        size
    }

    /// Writes `data` into the buffer.
    ///
    /// Without `range` the whole allocation is written, so `data` must cover
    /// it. With `range` only `range.size` bytes starting at `range.offset`
    /// are written.
    pub fn upload<T: Pod>(&self, data: &[T], range: Option<BufferMemoryRange>) {
        debug_assert!(self.is_valid(), "trying to upload data to an invalid buffer");
        debug_assert!(!self.is_empty(), "trying to upload data to an empty buffer");

        let range = range.unwrap_or(BufferMemoryRange::new(0, self.allocated_bytes));
        debug_assert!(
            range.fits_in(self.allocated_bytes),
            "upload range {range:?} exceeds the {} allocated bytes",
            self.allocated_bytes
        );

        let bytes: &[u8] = bytemuck::cast_slice(data);
        debug_assert!(
            bytes.len() as u64 >= range.size,
            "upload source holds {} bytes, {} required",
            bytes.len(),
            range.size
        );

        let len = (range.size as usize).min(bytes.len());
        self.backend.buffer_sub_data(self.id, range.offset, &bytes[..len]);
    }

    /// Binds to `target`, or to slot `index` of an indexed target
    /// (uniform / shader storage blocks).
    pub fn bind(&mut self, target: BufferType, index: Option<u32>) {
        debug_assert!(self.is_valid(), "cannot bind an invalid buffer");

        match index {
            Some(index) => {
                debug_assert!(
                    target.is_indexed(),
                    "{target:?} buffers cannot be bound to an index"
                );
                self.backend.bind_buffer_base(target, index, self.id);
            }
            None => self.backend.bind_buffer(target, self.id),
        }

        self.bound_as = Some(target);
    }

    /// Unbinds from the target of the last [`bind`](Self::bind).
    pub fn unbind(&mut self) {
        debug_assert!(self.is_valid(), "cannot unbind an invalid buffer");
        debug_assert!(self.bound_as.is_some(), "cannot unbind a buffer that is not bound");

        if let Some(target) = self.bound_as.take() {
            self.backend.bind_buffer(target, 0);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id != 0
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Allocated size in bytes.
    pub fn size(&self) -> u64 {
        debug_assert!(self.is_valid(), "cannot get size of an invalid buffer");
        self.allocated_bytes
    }

    pub fn bound_as(&self) -> Option<BufferType> {
        self.bound_as
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.backend.delete_buffer(self.id);
        log::trace!("buffer {} deleted", self.id);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("allocated_bytes", &self.allocated_bytes)
            .field("bound_as", &self.bound_as)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, ObjectKind};

    #[test]
    fn create_and_drop_are_symmetric() {
        let (ctx, mock) = Context::mock();
        {
            let a = Buffer::new(&ctx);
            let _b = Buffer::new(&ctx);
            assert!(a.is_valid());
            assert_eq!(mock.live_count(ObjectKind::Buffer), 2);
        }
        assert_eq!(mock.live_count(ObjectKind::Buffer), 0);
    }

    #[test]
    fn allocation_records_size() {
        let (ctx, mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        assert!(buffer.is_empty());

        assert_eq!(buffer.allocate(64, AccessSpecifier::DynamicDraw), 64);
        assert_eq!(buffer.size(), 64);
        assert!(mock.calls().contains(&Call::BufferStorage {
            buffer: buffer.id(),
            size: 64,
            usage: AccessSpecifier::DynamicDraw,
        }));
    }

    #[test]
    fn full_upload_writes_whole_allocation() {
        let (ctx, mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        buffer.allocate(12, AccessSpecifier::StaticDraw);
        mock.take_calls();

        buffer.upload(&[1.0f32, 2.0, 3.0], None);
        match mock.calls().as_slice() {
            [Call::BufferSubData { offset, data, .. }] => {
                assert_eq!(*offset, 0);
                assert_eq!(data.len(), 12);
                assert_eq!(data.as_slice(), bytemuck::cast_slice::<f32, u8>(&[1.0, 2.0, 3.0]));
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[test]
    fn ranged_upload_writes_only_the_range() {
        let (ctx, mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        buffer.allocate(16, AccessSpecifier::StaticDraw);
        mock.take_calls();

        buffer.upload(&[7u32, 8, 9], Some(BufferMemoryRange::new(8, 8)));
        assert_eq!(
            mock.calls(),
            vec![Call::BufferSubData {
                buffer: buffer.id(),
                offset: 8,
                data: bytemuck::cast_slice(&[7u32, 8]).to_vec(),
            }]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceeds")]
    fn range_outside_allocation_is_rejected() {
        let (ctx, _mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        buffer.allocate(16, AccessSpecifier::StaticDraw);
        buffer.upload(&[0u8; 16], Some(BufferMemoryRange::new(8, 16)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "2 GiB allocation limit")]
    fn oversized_allocation_is_rejected() {
        let (ctx, _mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        buffer.allocate(i32::MAX as u64 + 1, AccessSpecifier::StaticDraw);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty buffer")]
    fn upload_to_empty_buffer_is_rejected() {
        let (ctx, _mock) = Context::mock();
        let buffer = Buffer::new(&ctx);
        buffer.upload(&[0u8; 4], None);
    }

    #[test]
    fn unbind_uses_remembered_target() {
        let (ctx, mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        let id = buffer.id();

        buffer.bind(BufferType::ShaderStorage, Some(2));
        assert_eq!(buffer.bound_as(), Some(BufferType::ShaderStorage));
        buffer.unbind();
        assert_eq!(buffer.bound_as(), None);

        assert_eq!(
            mock.calls()[1..],
            [
                Call::BindBufferBase(BufferType::ShaderStorage, 2, id),
                Call::BindBuffer(BufferType::ShaderStorage, 0),
            ]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not bound")]
    fn unbind_without_bind_is_rejected() {
        let (ctx, _mock) = Context::mock();
        let mut buffer = Buffer::new(&ctx);
        buffer.unbind();
    }
}
