// src/core/render.rs

use serde_json::Value;

use crate::core::models::ResultPayload;

/// A single ranked classification entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub probability: f64,
}

/// The displayable form of a result payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub body: RenderedBody,
    /// Envelope facts worth a caption line, e.g. model name or timing.
    pub meta: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedBody {
    /// Ranked labels, highest probability first.
    Labels(Vec<LabelScore>),
    /// A plain textual prediction.
    Text(String),
    /// Anything we do not recognize, pretty-printed as JSON.
    Raw(String),
}

/// Turns the opaque result payload into something the result pane can draw.
///
/// The payload's shape belongs to the remote service, so rendering stays
/// behind this seam; the upload widget never looks inside the payload.
pub trait ResultRenderer: Send {
    fn render(&self, payload: &ResultPayload) -> RenderedResult;
}

/// Default renderer for classification services.
///
/// Understands three shapes, tried in order:
/// 1. the modelhub envelope: `{"output": [{"prediction": [...], ...}], ...}`
///    where a prediction is a ranked `[{"label", "probability"}]` list or a
///    plain string;
/// 2. a flat `{"label": ..., "confidence": ...}` object;
/// 3. a bare `[{"label", "probability"}]` list.
/// Everything else falls back to pretty-printed JSON.
pub struct ClassificationRenderer {
    pub max_labels: usize,
}

impl Default for ClassificationRenderer {
    fn default() -> Self {
        Self { max_labels: 5 }
    }
}

impl ResultRenderer for ClassificationRenderer {
    fn render(&self, payload: &ResultPayload) -> RenderedResult {
        let meta = collect_meta(payload);

        if let Some(body) = self.render_envelope(payload) {
            return RenderedResult { body, meta };
        }
        if let Some(body) = self.render_flat_label(payload) {
            return RenderedResult { body, meta };
        }
        if let Some(labels) = self.parse_label_list(payload) {
            return RenderedResult {
                body: RenderedBody::Labels(labels),
                meta,
            };
        }

        let raw = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        RenderedResult {
            body: RenderedBody::Raw(raw),
            meta,
        }
    }
}

impl ClassificationRenderer {
    fn render_envelope(&self, payload: &Value) -> Option<RenderedBody> {
        let outputs = payload.get("output")?.as_array()?;
        let first = outputs.first()?;
        let prediction = first.get("prediction")?;

        if let Some(labels) = self.parse_label_list(prediction) {
            return Some(RenderedBody::Labels(labels));
        }
        if let Some(text) = prediction.as_str() {
            return Some(RenderedBody::Text(text.to_string()));
        }
        None
    }

    fn render_flat_label(&self, payload: &Value) -> Option<RenderedBody> {
        let label = payload.get("label")?.as_str()?.to_string();
        let probability = payload
            .get("confidence")
            .or_else(|| payload.get("probability"))
            .and_then(Value::as_f64)
            .unwrap_or(1.0);
        Some(RenderedBody::Labels(vec![LabelScore { label, probability }]))
    }

    fn parse_label_list(&self, value: &Value) -> Option<Vec<LabelScore>> {
        let entries = value.as_array()?;
        let mut labels: Vec<LabelScore> = entries
            .iter()
            .map(|entry| {
                let label = entry.get("label")?.as_str()?.to_string();
                let probability = entry.get("probability")?.as_f64()?;
                Some(LabelScore { label, probability })
            })
            .collect::<Option<Vec<_>>>()?;
        if labels.is_empty() {
            return None;
        }
        labels.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        labels.truncate(self.max_labels);
        Some(labels)
    }
}

fn collect_meta(payload: &Value) -> Vec<(String, String)> {
    let mut meta = Vec::new();
    if let Some(name) = payload
        .get("model")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
    {
        meta.push(("model".to_string(), name.to_string()));
    }
    if let Some(seconds) = payload.get("processing_time").and_then(Value::as_f64) {
        meta.push(("processing time".to_string(), format!("{:.3}s", seconds)));
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_label_confidence_renders_a_single_entry() {
        let renderer = ClassificationRenderer::default();
        let rendered = renderer.render(&json!({"label": "cat", "confidence": 0.98}));
        assert_eq!(
            rendered.body,
            RenderedBody::Labels(vec![LabelScore {
                label: "cat".to_string(),
                probability: 0.98,
            }])
        );
        assert!(rendered.meta.is_empty());
    }

    #[test]
    fn envelope_label_list_is_ranked_and_truncated() {
        let renderer = ClassificationRenderer { max_labels: 2 };
        let payload = json!({
            "output": [{
                "prediction": [
                    {"label": "tabby", "probability": 0.61},
                    {"label": "lynx", "probability": 0.02},
                    {"label": "tiger cat", "probability": 0.33}
                ],
                "type": "label_list",
                "name": "probabilities"
            }],
            "processing_time": 1.204,
            "model": {"id": "abc", "name": "squeezenet"}
        });
        let rendered = renderer.render(&payload);
        match rendered.body {
            RenderedBody::Labels(labels) => {
                assert_eq!(labels.len(), 2);
                assert_eq!(labels[0].label, "tabby");
                assert_eq!(labels[1].label, "tiger cat");
            }
            other => panic!("expected labels, got {:?}", other),
        }
        assert_eq!(
            rendered.meta,
            vec![
                ("model".to_string(), "squeezenet".to_string()),
                ("processing time".to_string(), "1.204s".to_string()),
            ]
        );
    }

    #[test]
    fn textual_prediction_renders_as_text() {
        let renderer = ClassificationRenderer::default();
        let payload = json!({"output": [{"prediction": "a cat on a sofa"}]});
        assert_eq!(
            renderer.render(&payload).body,
            RenderedBody::Text("a cat on a sofa".to_string())
        );
    }

    #[test]
    fn unknown_shapes_fall_back_to_raw_json() {
        let renderer = ClassificationRenderer::default();
        let rendered = renderer.render(&json!({"segmentation_mask": [[0, 1], [1, 0]]}));
        match rendered.body {
            RenderedBody::Raw(raw) => assert!(raw.contains("segmentation_mask")),
            other => panic!("expected raw fallback, got {:?}", other),
        }
    }
}
