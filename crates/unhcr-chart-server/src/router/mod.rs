pub mod capabilities;
pub mod ext;
pub mod service;
pub mod traits;

pub use capabilities::CapabilitiesBuilder;
pub use ext::RouterExt;
pub use service::RouterService;
pub use traits::Router;
