use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::{
    client::ChartClient,
    core::{
        CallToolResult, Tool, content::Content, protocol::capabilities::ServerCapabilities,
    },
    error::{Error, Result},
    model::ChartResult,
    server::router::{CapabilitiesBuilder, Router},
    tools::chart::{
        generate_comparison_chart, generate_population_trend_chart, generate_unhcr_graph,
    },
};

pub const GENERATE_UNHCR_GRAPH: &str = "generate_unhcr_graph";
pub const GENERATE_COMPARISON_CHART: &str = "generate_comparison_chart";
pub const GENERATE_POPULATION_TREND_CHART: &str = "generate_population_trend_chart";

#[derive(Clone)]
pub struct ChartRouter {
    client: ChartClient,
}

impl ChartRouter {
    pub fn new(client: ChartClient) -> Self {
        Self { client }
    }
}

fn parse_args<T: DeserializeOwned>(tool_name: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| Error::InvalidParameters(format!("Invalid arguments for {tool_name}: {e}")))
}

fn into_call_result(result: ChartResult) -> Result<CallToolResult> {
    let mut content = vec![Content::text(serde_json::to_string_pretty(&result)?)];
    if let Some(data) = result.image_base64() {
        content.push(Content::image(data, "image/png"));
    }

    Ok(if result.is_success() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    })
}

fn descriptive_properties() -> Value {
    json!({
        "chart_type": {
            "type": "string",
            "description": "Type of chart to generate (bar, line, pie, scatter, etc.)"
        },
        "title": { "type": "string", "description": "Main title of the chart" },
        "subtitle": { "type": "string", "description": "Subtitle describing the chart content" },
        "x_label": { "type": "string", "description": "Label for the x-axis" },
        "y_label": { "type": "string", "description": "Label for the y-axis" }
    })
}

fn schema_with(extra: Value, required: &[&str]) -> Value {
    let mut properties = descriptive_properties();
    if let (Some(base), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        base.extend(extra);
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

#[async_trait]
impl Router for ChartRouter {
    fn name(&self) -> String {
        "unhcr-chart".to_string()
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn instructions(&self) -> String {
        "This server renders UNHCR-styled charts through a remote plotting service. Use \
         generate_unhcr_graph for a single series, generate_comparison_chart for several \
         datasets and generate_population_trend_chart for a country's refugee population over \
         time. Every tool returns a status envelope with a markdown image preview."
            .to_string()
    }

    fn capabilities(&self) -> ServerCapabilities {
        CapabilitiesBuilder::new().with_tools(false).build()
    }

    fn list_tools(&self) -> Vec<Tool> {
        let descriptive = ["chart_type", "title", "subtitle", "x_label", "y_label"];
        vec![
            Tool::new(
                GENERATE_UNHCR_GRAPH,
                "Generate a UNHCR chart from one series of labels and values",
                schema_with(
                    json!({
                        "labels": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Labels for the data points (e.g. years, countries)"
                        },
                        "values": {
                            "type": "array",
                            "items": { "type": "number" },
                            "description": "Numerical values corresponding to the labels"
                        }
                    }),
                    &[&descriptive[..], &["labels", "values"][..]].concat(),
                ),
            ),
            Tool::new(
                GENERATE_COMPARISON_CHART,
                "Generate a comparison chart with multiple datasets",
                schema_with(
                    json!({
                        "datasets": {
                            "type": "array",
                            "description": "Datasets, each containing 'label', 'labels' and 'values'",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "label": { "type": "string" },
                                    "labels": { "type": "array", "items": { "type": "string" } },
                                    "values": { "type": "array", "items": { "type": "number" } }
                                },
                                "required": ["labels", "values"]
                            }
                        }
                    }),
                    &[&descriptive[..], &["datasets"][..]].concat(),
                ),
            ),
            Tool::new(
                GENERATE_POPULATION_TREND_CHART,
                "Generate a refugee population trend chart for a country or region",
                json!({
                    "type": "object",
                    "properties": {
                        "years": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Years for the x-axis"
                        },
                        "population_counts": {
                            "type": "array",
                            "items": { "type": "number" },
                            "description": "Population count for each year"
                        },
                        "country_name": {
                            "type": "string",
                            "default": "Country",
                            "description": "Name of the country or region being visualized"
                        },
                        "chart_type": {
                            "type": "string",
                            "default": "line",
                            "description": "Type of chart (line, bar, etc.)"
                        }
                    },
                    "required": ["years", "population_counts"]
                }),
            ),
        ]
    }

    async fn call_tool(&self, tool_name: &str, arguments: Value) -> Result<CallToolResult> {
        let result = match tool_name {
            GENERATE_UNHCR_GRAPH => {
                generate_unhcr_graph(&self.client, parse_args(tool_name, arguments)?).await
            }
            GENERATE_COMPARISON_CHART => {
                generate_comparison_chart(&self.client, parse_args(tool_name, arguments)?).await
            }
            GENERATE_POPULATION_TREND_CHART => {
                generate_population_trend_chart(&self.client, parse_args(tool_name, arguments)?)
                    .await
            }
            _ => return Err(Error::System(format!("Tool {} not found", tool_name))),
        };
        into_call_result(result)
    }
}
