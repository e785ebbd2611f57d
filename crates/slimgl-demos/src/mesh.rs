use bytemuck::Pod;
use slimgl::data::VertexAttribute;
use slimgl::types::{AccessSpecifier, PrimitiveMode};
use slimgl::{Buffer, Context, VertexArray};

/// Indexed geometry: static vertex and index buffers plus their layout.
pub struct Mesh {
    vertex_array: VertexArray,
    index_count: u32,
    // Kept alive for the vertex array.
    _vertex_buffer: Buffer,
    _index_buffer: Buffer,
}

impl Mesh {
    pub fn new<V: Pod>(
        context: &Context,
        vertices: &[V],
        indices: &[u32],
        layout: &[VertexAttribute],
    ) -> Self {
        let mut vertex_buffer = static_buffer(context, vertices);
        let mut index_buffer = static_buffer(context, indices);

        let mut vertex_array = VertexArray::new(context);
        vertex_array.set_layout(layout, &mut vertex_buffer, &mut index_buffer);

        Self {
            vertex_array,
            index_count: indices.len() as u32,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
        }
    }

    pub fn draw(&self, context: &Context, mode: PrimitiveMode) {
        self.vertex_array.bind();
        context.draw_elements(mode, self.index_count);
        self.vertex_array.unbind();
    }

    pub fn draw_instanced(&self, context: &Context, mode: PrimitiveMode, instances: u32) {
        self.vertex_array.bind();
        context.draw_elements_instanced(mode, self.index_count, instances);
        self.vertex_array.unbind();
    }
}

fn static_buffer<T: Pod>(context: &Context, data: &[T]) -> Buffer {
    let mut buffer = Buffer::new(context);
    buffer.allocate(std::mem::size_of_val(data) as u64, AccessSpecifier::StaticDraw);
    buffer.upload(data, None);
    buffer
}
