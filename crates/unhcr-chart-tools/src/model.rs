use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const IMAGE_FORMAT: &str = "png";

const DATA_URI_PREFIX: &str = "](data:image/png;base64,";

/// Payload posted to the chart service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub chart_type: String,
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    Series {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Datasets {
        datasets: Vec<Dataset>,
    },
}

/// One series of a comparison chart.
///
/// Kept as the caller's JSON object and forwarded to the renderer untouched; the renderer
/// decides what a well-formed dataset is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(pub Map<String, Value>);

impl Dataset {
    pub fn label(&self) -> Option<&str> {
        self.0.get("label").and_then(Value::as_str)
    }

    /// `labels` and `values`, when both are present as arrays.
    fn series(&self) -> Option<(&[Value], &[Value])> {
        let labels = self.0.get("labels")?.as_array()?;
        let values = self.0.get("values")?.as_array()?;
        Some((labels.as_slice(), values.as_slice()))
    }
}

impl From<Map<String, Value>> for Dataset {
    fn from(map: Map<String, Value>) -> Self {
        Dataset(map)
    }
}

impl ChartData {
    pub fn series(labels: Vec<String>, values: Vec<f64>) -> Self {
        ChartData::Series { labels, values }
    }

    pub fn datasets(datasets: Vec<Dataset>) -> Self {
        ChartData::Datasets { datasets }
    }

    /// Checks that every series pairs each label with exactly one value.
    pub fn validate(&self) -> Result<()> {
        match self {
            ChartData::Series { labels, values } => {
                if labels.len() != values.len() {
                    return Err(Error::InvalidParameters(format!(
                        "labels and values must be the same length ({} labels, {} values)",
                        labels.len(),
                        values.len()
                    )));
                }
            }
            ChartData::Datasets { datasets } => {
                for (idx, dataset) in datasets.iter().enumerate() {
                    let Some((labels, values)) = dataset.series() else {
                        continue;
                    };
                    if labels.len() != values.len() {
                        let name = dataset.label().unwrap_or("unnamed");
                        return Err(Error::InvalidParameters(format!(
                            "dataset {idx} ({name}) has {} labels but {} values",
                            labels.len(),
                            values.len()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Envelope returned by every chart tool, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartResult {
    Success {
        chart_type: String,
        title: String,
        image_format: String,
        markdown_preview: String,
        message: String,
    },
    Error {
        error: String,
        message: String,
    },
}

impl ChartResult {
    pub fn success(chart_type: String, title: String, image: &[u8]) -> Self {
        let encoded = STANDARD.encode(image);
        ChartResult::Success {
            message: format!("Successfully generated {chart_type} chart: {title}"),
            markdown_preview: format!("![{title}{DATA_URI_PREFIX}{encoded})"),
            image_format: IMAGE_FORMAT.to_string(),
            chart_type,
            title,
        }
    }

    pub fn failure(title: &str, error: &Error) -> Self {
        ChartResult::Error {
            error: error.to_string(),
            message: format!("Failed to generate chart: {title}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChartResult::Success { .. })
    }

    /// The base64 PNG embedded in the markdown preview.
    pub fn image_base64(&self) -> Option<&str> {
        match self {
            ChartResult::Success {
                markdown_preview, ..
            } => markdown_preview
                .rsplit_once(DATA_URI_PREFIX)
                .and_then(|(_, rest)| rest.strip_suffix(')')),
            ChartResult::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn series_serializes_flat() {
        let data = ChartData::series(vec!["2020".into(), "2021".into()], vec![1.5, 2.0]);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"labels": ["2020", "2021"], "values": [1.5, 2.0]})
        );
    }

    #[test]
    fn dataset_keeps_unknown_keys_and_integer_values() {
        let raw = json!({"label": "Syria", "labels": ["2020"], "values": [6700000], "color": "#0072BC"});
        let dataset: Dataset = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(dataset.label(), Some("Syria"));
        assert_eq!(serde_json::to_value(&dataset).unwrap(), raw);
    }

    #[test]
    fn dataset_keeps_explicit_null_label() {
        let raw = json!({"label": null, "labels": ["a"], "values": [1]});
        let dataset: Dataset = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(dataset.label(), None);
        assert_eq!(serde_json::to_value(&dataset).unwrap(), raw);
    }

    #[test]
    fn incomplete_datasets_are_left_to_the_renderer() {
        let no_labels: Dataset =
            serde_json::from_value(json!({"label": "A", "values": [1, 2]})).unwrap();
        let text_values: Dataset =
            serde_json::from_value(json!({"label": "B", "labels": ["x"], "values": ["12"]}))
                .unwrap();
        assert!(ChartData::datasets(vec![no_labels, text_values]).validate().is_ok());
    }

    #[test]
    fn mismatched_series_fails_validation() {
        let data = ChartData::series(vec!["a".into()], vec![1.0, 2.0]);
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("1 labels, 2 values"));
    }

    #[test]
    fn mismatched_dataset_names_the_offender() {
        let good: Dataset =
            serde_json::from_value(json!({"label": "A", "labels": ["x"], "values": [1]})).unwrap();
        let bad: Dataset =
            serde_json::from_value(json!({"label": "B", "labels": ["x", "y"], "values": [1]}))
                .unwrap();
        let err = ChartData::datasets(vec![good, bad]).validate().unwrap_err();
        assert!(err.to_string().contains("dataset 1 (B)"));
    }

    #[test]
    fn success_envelope_shape() {
        let result = ChartResult::success("bar".into(), "Arrivals".into(), b"\x89PNG");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["image_format"], "png");
        assert_eq!(value["message"], "Successfully generated bar chart: Arrivals");
        assert_eq!(
            value["markdown_preview"],
            "![Arrivals](data:image/png;base64,iVBORw==)"
        );
        assert_eq!(result.image_base64(), Some("iVBORw=="));
    }

    #[test]
    fn error_envelope_has_no_image_fields() {
        let err = Error::RemoteRequest("connection refused".into());
        let result = ChartResult::failure("Arrivals", &err);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "error",
                "error": "remote request failed: connection refused",
                "message": "Failed to generate chart: Arrivals"
            })
        );
        assert!(result.image_base64().is_none());
    }
}
