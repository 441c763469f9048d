mod generate_stream_id;
mod now;

pub use generate_stream_id::generate_stream_id;
pub use now::now;
