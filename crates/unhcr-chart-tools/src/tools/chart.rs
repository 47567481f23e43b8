use serde::{Deserialize, Serialize};

use crate::{
    client::ChartClient,
    model::{ChartData, ChartRequest, ChartResult, Dataset},
};

pub const POPULATION_TREND_SUBTITLE: &str = "UNHCR Population Data Over Time";
pub const POPULATION_TREND_X_LABEL: &str = "Year";
pub const POPULATION_TREND_Y_LABEL: &str = "Population Count";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnhcrGraphArgs {
    pub chart_type: String,
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonChartArgs {
    pub chart_type: String,
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationTrendArgs {
    pub years: Vec<String>,
    pub population_counts: Vec<f64>,
    #[serde(default = "default_country_name")]
    pub country_name: String,
    #[serde(default = "default_trend_chart_type")]
    pub chart_type: String,
}

fn default_country_name() -> String {
    "Country".to_string()
}

fn default_trend_chart_type() -> String {
    "line".to_string()
}

/// Sends one chart request to the renderer and wraps the outcome in an envelope.
///
/// Never fails: validation problems and remote failures come back as
/// [`ChartResult::Error`].
pub async fn generate_chart(client: &ChartClient, request: ChartRequest) -> ChartResult {
    if let Err(e) = request.data.validate() {
        tracing::error!(error = %e, title = %request.title, "Rejecting malformed chart data");
        return ChartResult::failure(&request.title, &e);
    }

    tracing::info!(
        endpoint = %client.endpoint(),
        "Generating {} chart: {}",
        request.chart_type,
        request.title
    );

    match client.render(&request).await {
        Ok(image) => {
            tracing::debug!(bytes = image.len(), "Chart rendered");
            ChartResult::success(request.chart_type, request.title, &image)
        }
        Err(e) => {
            tracing::error!(remote = e.is_remote(), "Error generating chart: {e}");
            ChartResult::failure(&request.title, &e)
        }
    }
}

pub async fn generate_unhcr_graph(client: &ChartClient, args: UnhcrGraphArgs) -> ChartResult {
    let request = ChartRequest {
        chart_type: args.chart_type,
        title: args.title,
        subtitle: args.subtitle,
        x_label: args.x_label,
        y_label: args.y_label,
        data: ChartData::series(args.labels, args.values),
    };
    generate_chart(client, request).await
}

pub async fn generate_comparison_chart(
    client: &ChartClient,
    args: ComparisonChartArgs,
) -> ChartResult {
    let request = ChartRequest {
        chart_type: args.chart_type,
        title: args.title,
        subtitle: args.subtitle,
        x_label: args.x_label,
        y_label: args.y_label,
        data: ChartData::datasets(args.datasets),
    };
    generate_chart(client, request).await
}

pub async fn generate_population_trend_chart(
    client: &ChartClient,
    args: PopulationTrendArgs,
) -> ChartResult {
    let graph = UnhcrGraphArgs {
        chart_type: args.chart_type,
        title: format!("{} Refugee Population Trends", args.country_name),
        subtitle: POPULATION_TREND_SUBTITLE.to_string(),
        x_label: POPULATION_TREND_X_LABEL.to_string(),
        y_label: POPULATION_TREND_Y_LABEL.to_string(),
        labels: args.years,
        values: args.population_counts,
    };
    generate_unhcr_graph(client, graph).await
}
