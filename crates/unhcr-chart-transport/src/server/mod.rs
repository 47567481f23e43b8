pub mod byte;
pub mod sse;
pub mod traits;

pub use byte::ByteTransport;
pub use sse::SseTransport;
pub use traits::ServerTransport;
