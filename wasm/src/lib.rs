use demarc::{Graph, RenderOptions, compute_highlights, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DmrsRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct ParseResultsDoc {
    #[serde(default)]
    result: ResultsBlock,
}

#[derive(Debug, Default, Deserialize)]
struct ResultsBlock {
    #[serde(default, rename = "RESULTS")]
    results: Vec<Graph>,
}

fn build_render_options(options: DmrsRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }

    render_options
}

fn parse_options(options_json: Option<String>) -> Result<RenderOptions, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<DmrsRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        DmrsRenderOptions::default()
    };
    Ok(build_render_options(options))
}

/// Render one DMRS graph document (JSON `{nodes, links}`) to SVG markup.
#[wasm_bindgen]
pub fn render_dmrs_svg(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let graph = serde_json::from_str::<Graph>(graph_json)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let render_options = parse_options(options_json)?;
    render_with_options(&graph, &render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Render every analysis in a parse response, returning a JSON array of
/// SVG strings in the same order.
#[wasm_bindgen]
pub fn render_parse_results(
    response_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let doc = serde_json::from_str::<ParseResultsDoc>(response_json)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let render_options = parse_options(options_json)?;
    let mut svgs = Vec::with_capacity(doc.result.results.len());
    for graph in &doc.result.results {
        let svg = render_with_options(graph, &render_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?;
        svgs.push(svg);
    }
    serde_json::to_string(&svgs).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Highlight sets for a selected node as JSON `{out, in, labelset, scope}`.
#[wasm_bindgen]
pub fn highlights_for_node(graph_json: &str, node_id: u32) -> Result<String, JsValue> {
    let graph = serde_json::from_str::<Graph>(graph_json)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let highlights = compute_highlights(&graph, node_id);
    serde_json::to_string(&highlights).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use demarc::render_with_options;

    use crate::{DmrsRenderOptions, build_render_options};

    const DOG_SLEEPS: &str = r#"{
        "nodes": [
            {"id": 10000, "pred": "_the_q", "cfrom": 0, "cto": 3},
            {"id": 10001, "pred": "_dog_n_1", "cfrom": 4, "cto": 7},
            {"id": 10002, "pred": "_sleep_v_1", "cfrom": 8, "cto": 15}
        ],
        "links": [
            {"start": 0, "end": 10002, "rargname": "", "post": "H"},
            {"start": 10000, "end": 10001, "rargname": "RSTR", "post": "H"},
            {"start": 10002, "end": 10001, "rargname": "ARG1", "post": "NEQ"}
        ]
    }"#;

    #[test]
    fn classic_is_the_default_look() {
        let options = build_render_options(DmrsRenderOptions::default());
        assert_eq!(options.theme.font_family, "sans-serif");

        let modern = build_render_options(DmrsRenderOptions {
            theme: Some("modern".to_string()),
            font_family: None,
            font_size: Some(16.0),
        });
        assert_ne!(modern.theme.font_family, "sans-serif");
        assert_eq!(modern.theme.font_size, 16.0);
    }

    #[test]
    fn renders_a_graph_document() {
        let graph = serde_json::from_str(DOG_SLEEPS).expect("document should deserialize");
        let svg = render_with_options(&graph, &build_render_options(DmrsRenderOptions::default()))
            .expect("document should render");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("_sleep_v_1"));
        assert!(svg.contains("RSTR/H"));
    }
}
