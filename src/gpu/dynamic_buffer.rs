//! Vertex and index buffers that grow with the scene.

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 256;

/// A GPU buffer that reallocates at twice the needed size when a write
/// overflows it. Never shrinks.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Empty buffer with room for `initial_capacity` bytes.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Replace the contents with `data`, growing first if needed.
    ///
    /// Returns `true` if the underlying buffer was reallocated.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.write_from(device, queue, data, 0)
    }

    /// Make the buffer hold `data`, assuming elements before `from` are
    /// already on the GPU. Only `data[from..]` is written unless the buffer
    /// has to grow, in which case everything is written to the new buffer.
    ///
    /// Returns `true` if the underlying buffer was reallocated.
    pub fn write_from<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
        from: usize,
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let grew = bytes.len() > self.capacity;
        if grew {
            self.capacity = (bytes.len() * 2).max(MIN_CAPACITY);
            self.buffer =
                allocate(device, &self.label, self.capacity, self.usage);
            log::debug!(
                "grew {} buffer to {} bytes",
                self.label,
                self.capacity
            );
        }
        let offset = if grew {
            0
        } else {
            (from * size_of::<T>()).min(bytes.len())
        };
        if offset < bytes.len() {
            queue.write_buffer(&self.buffer, offset as u64, &bytes[offset..]);
        }
        self.len = bytes.len();
        grew
    }

    /// The GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last [`write`](Self::write).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    size: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
