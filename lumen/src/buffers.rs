mod scene_buffers;
mod storage_buffer;
mod uniform_buffer;

pub use self::scene_buffers::*;
pub use self::storage_buffer::*;
pub use self::uniform_buffer::*;
