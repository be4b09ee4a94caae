use std::marker::PhantomData;
use std::{any, mem};

use bytemuck::Pod;
use derivative::Derivative;

/// Single `T` living in a GPU uniform buffer.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,

    #[derivative(Debug = "ignore")]
    _marker: PhantomData<T>,
}

impl<T> UniformBuffer<T>
where
    T: Pod,
{
    pub fn new(device: &wgpu::Device, label: impl AsRef<str>) -> Self {
        let label = label.as_ref();
        let size = padded_size(mem::size_of::<T>());

        log::debug!(
            "Allocating uniform buffer `{label}`; ty={}, size={size}",
            any::type_name::<T>(),
        );

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
            size: size as _,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, data: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(data));
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
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        (layout, self.buffer.as_entire_binding())
    }
}

fn padded_size(size: usize) -> usize {
    (size + 31) & !31
}

#[cfg(test)]
mod tests {
    #[test]
    fn padded_size() {
        assert_eq!(0, super::padded_size(0));
        assert_eq!(32, super::padded_size(16));
        assert_eq!(32, super::padded_size(32));
        assert_eq!(64, super::padded_size(33));
    }
}
