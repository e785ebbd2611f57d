use std::rc::Rc;

use crate::backend::{Backend, NativeId};
use crate::buffer::Buffer;
use crate::context::Context;
use crate::data::VertexAttribute;
use crate::types::BufferType;

/// Vertex array object: an interleaved attribute layout plus the element
/// buffer binding.
pub struct VertexArray {
    backend: Rc<dyn Backend>,
    id: NativeId,
    attribute_count: u32,
}

impl VertexArray {
    pub fn new(context: &Context) -> Self {
        let backend = context.backend();
        let id = backend.create_vertex_array();
        log::trace!("vertex array {id} created");

        Self {
            backend,
            id,
            attribute_count: 0,
        }
    }

    /// True once a layout has been set.
    pub fn is_valid(&self) -> bool {
        self.attribute_count > 0
    }

    /// Describes interleaved vertices stored in `vertex_buffer`, indexed by
    /// `index_buffer`.
    ///
    /// Attribute `i` reads from shader location `i`. The stride is the sum
    /// of all attribute sizes; offsets follow declaration order.
    pub fn set_layout(
        &mut self,
        attributes: &[VertexAttribute],
        vertex_buffer: &mut Buffer,
        index_buffer: &mut Buffer,
    ) {
        debug_assert!(!self.is_valid(), "vertex array layout already set");

        self.bind();
        index_buffer.bind(BufferType::Index, None);
        vertex_buffer.bind(BufferType::Vertex, None);

        let stride: u32 = attributes.iter().map(|a| a.size_in_bytes()).sum();
        let mut offset = 0;

        for (index, attribute) in (0u32..).zip(attributes) {
            debug_assert!(
                (1..=4).contains(&attribute.count),
                "attribute count must be between 1 and 4, got {}",
                attribute.count
            );

            self.backend.enable_vertex_attrib(index);
            self.backend.vertex_attrib_pointer(
                index,
                attribute.count,
                attribute.ty,
                attribute.normalized,
                stride,
                offset,
            );

            offset += attribute.size_in_bytes();
            self.attribute_count += 1;
        }

        // The element buffer binding is vertex array state: release the
        // vertex array first so unbinding the index buffer does not clear it.
        self.unbind();
        index_buffer.unbind();
        vertex_buffer.unbind();
    }

    /// Disables every attribute of the current layout.
    pub fn reset_layout(&mut self) {
        debug_assert!(self.is_valid(), "vertex array layout not set");

        self.bind();
        for index in 0..self.attribute_count {
            self.backend.disable_vertex_attrib(index);
        }
        self.attribute_count = 0;
        self.unbind();
    }

    pub fn bind(&self) {
        self.backend.bind_vertex_array(self.id);
    }

    pub fn unbind(&self) {
        self.backend.bind_vertex_array(0);
    }

    pub fn attribute_count(&self) -> u32 {
        self.attribute_count
    }

    pub fn id(&self) -> NativeId {
        self.id
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.backend.delete_vertex_array(self.id);
        log::trace!("vertex array {} deleted", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, ObjectKind};
    use crate::types::DataType;

    fn buffers(ctx: &Context) -> (Buffer, Buffer) {
        (Buffer::new(ctx), Buffer::new(ctx))
    }

    #[test]
    fn layout_interleaves_attributes() {
        let (ctx, mock) = Context::mock();
        let (mut vb, mut ib) = buffers(&ctx);
        let mut va = VertexArray::new(&ctx);
        mock.take_calls();

        va.set_layout(
            &[
                VertexAttribute::new(DataType::Float, 3),
                VertexAttribute::new(DataType::Float, 2),
                VertexAttribute::new(DataType::UnsignedByte, 4).normalized(),
            ],
            &mut vb,
            &mut ib,
        );

        assert!(va.is_valid());
        assert_eq!(va.attribute_count(), 3);

        let pointers: Vec<_> = mock
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::VertexAttribPointer {
                    index,
                    stride,
                    offset,
                    normalized,
                    ..
                } => Some((index, stride, offset, normalized)),
                _ => None,
            })
            .collect();
        assert_eq!(
            pointers,
            vec![(0, 24, 0, false), (1, 24, 12, false), (2, 24, 20, true)]
        );
    }

    #[test]
    fn vertex_array_is_released_before_index_buffer() {
        let (ctx, mock) = Context::mock();
        let (mut vb, mut ib) = buffers(&ctx);
        let mut va = VertexArray::new(&ctx);
        mock.take_calls();

        va.set_layout(&[VertexAttribute::default()], &mut vb, &mut ib);

        let calls = mock.calls();
        let position = |wanted: &Call| calls.iter().position(|c| c == wanted);

        let va_bound = position(&Call::BindVertexArray(va.id()));
        let ib_bound = position(&Call::BindBuffer(BufferType::Index, ib.id()));
        let vb_bound = position(&Call::BindBuffer(BufferType::Vertex, vb.id()));
        let va_released = position(&Call::BindVertexArray(0));
        let ib_released = position(&Call::BindBuffer(BufferType::Index, 0));

        assert!(va_bound < ib_bound && ib_bound < vb_bound);
        assert!(va_released < ib_released);
        assert_eq!(vb.bound_as(), None);
        assert_eq!(ib.bound_as(), None);
    }

    #[test]
    fn reset_disables_every_attribute() {
        let (ctx, mock) = Context::mock();
        let (mut vb, mut ib) = buffers(&ctx);
        let mut va = VertexArray::new(&ctx);
        va.set_layout(
            &[VertexAttribute::default(), VertexAttribute::default()],
            &mut vb,
            &mut ib,
        );
        mock.take_calls();

        va.reset_layout();
        assert!(!va.is_valid());
        assert!(mock.calls().contains(&Call::DisableVertexAttrib(0)));
        assert!(mock.calls().contains(&Call::DisableVertexAttrib(1)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already set")]
    fn layout_cannot_be_set_twice() {
        let (ctx, _mock) = Context::mock();
        let (mut vb, mut ib) = buffers(&ctx);
        let mut va = VertexArray::new(&ctx);
        va.set_layout(&[VertexAttribute::default()], &mut vb, &mut ib);
        va.set_layout(&[VertexAttribute::default()], &mut vb, &mut ib);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "between 1 and 4")]
    fn oversized_attribute_is_rejected() {
        let (ctx, _mock) = Context::mock();
        let (mut vb, mut ib) = buffers(&ctx);
        let mut va = VertexArray::new(&ctx);
        va.set_layout(&[VertexAttribute::new(DataType::Float, 5)], &mut vb, &mut ib);
    }

    #[test]
    fn drop_deletes_the_native_object() {
        let (ctx, mock) = Context::mock();
        drop(VertexArray::new(&ctx));
        assert_eq!(mock.live_count(ObjectKind::VertexArray), 0);
    }
}
