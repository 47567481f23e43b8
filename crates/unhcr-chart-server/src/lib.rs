pub mod router;
pub mod server;

pub use unhcr_chart_core as core;
pub use unhcr_chart_error as error;
pub use unhcr_chart_transport::server as transport;
