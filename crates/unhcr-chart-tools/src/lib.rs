pub mod client;
pub mod config;
pub mod model;
pub mod service;
pub mod tools;

pub use client::ChartClient;
pub use config::ChartConfig;
pub use model::{ChartData, ChartRequest, ChartResult, Dataset};
pub use service::chart::ChartRouter;
pub use unhcr_chart_core as core;
pub use unhcr_chart_error as error;
pub use unhcr_chart_server as server;
