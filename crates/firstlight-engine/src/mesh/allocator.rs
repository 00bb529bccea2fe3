use wgpu::util::DeviceExt;

/// GPU buffer holding mesh data, with its byte length.
#[derive(Debug, Clone)]
pub struct MeshBuffer {
    buffer: wgpu::Buffer,
    len: u64,
}

impl MeshBuffer {
    pub fn raw(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

/// Allocates the device buffers backing meshes.
///
/// Holds its own device handle so meshes can be built away from the `Gpu` borrow.
pub struct MeshBufferAllocator {
    device: wgpu::Device,
    allocations: usize,
    bytes: u64,
}

impl MeshBufferAllocator {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            device: device.clone(),
            allocations: 0,
            bytes: 0,
        }
    }

    /// Creates a buffer initialized with `contents`.
    pub fn allocate(
        &mut self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> MeshBuffer {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            });

        self.allocations += 1;
        self.bytes += contents.len() as u64;
        log::trace!("allocated mesh buffer '{label}' ({} bytes)", contents.len());

        MeshBuffer {
            buffer,
            len: contents.len() as u64,
        }
    }

    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Total bytes handed out so far.
    pub fn allocated_bytes(&self) -> u64 {
        self.bytes
    }
}
