use std::any;
use std::marker::PhantomData;

use bytemuck::Pod;
use derivative::Derivative;

/// Growable GPU-side array of `T`.
///
/// Only ever grows: writing fewer items than it has room for just leaves the
/// tail stale, so readers have to know the actual length from elsewhere.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct StorageBuffer<T> {
    label: String,
    buffer: wgpu::Buffer,
    capacity: usize,

    #[derivative(Debug = "ignore")]
    _marker: PhantomData<T>,
}

impl<T> StorageBuffer<T>
where
    T: Pod,
{
    pub fn new(device: &wgpu::Device, label: impl Into<String>) -> Self {
        let label = label.into();
        let capacity = 1;
        let buffer = Self::allocate(device, &label, capacity);

        Self {
            label,
            buffer,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Uploads given items, reallocating the buffer if they don't fit; returns
    /// whether reallocation happened (which invalidates bind groups).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        items: &[T],
    ) -> bool {
        let mut reallocated = false;

        if items.len() > self.capacity {
            self.capacity = capacity_for(items.len());
            self.buffer = Self::allocate(device, &self.label, self.capacity);

            reallocated = true;
        }

        if !items.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        }

        reallocated
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind(
        &self,
        binding: u32,
    ) -> (wgpu::BindGroupLayoutEntry, wgpu::BindingResource) {
        let layout = wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        (layout, self.buffer.as_entire_binding())
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
    ) -> wgpu::Buffer {
        let size = capacity * std::mem::size_of::<T>();

        log::debug!(
            "Allocating storage buffer `{label}`; ty={}, size={size}",
            any::type_name::<T>(),
        );

        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::STORAGE,
            size: size as _,
            mapped_at_creation: false,
        })
    }
}

/// Returns how many items a buffer should have room for in order to store
/// `len` of them, with some slack for future growth.
fn capacity_for(len: usize) -> usize {
    len.max(1).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_for() {
        assert_eq!(1, super::capacity_for(0));
        assert_eq!(1, super::capacity_for(1));
        assert_eq!(4, super::capacity_for(3));
        assert_eq!(1024, super::capacity_for(1000));
        assert_eq!(1024, super::capacity_for(1024));
    }
}
