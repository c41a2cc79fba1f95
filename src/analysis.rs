//! Report shape returned by the repository analysis service.

use serde::{Deserialize, Serialize};

use crate::components::mind_map::MindMapData;

/// What the service reports about one repository.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
	pub summary: String,
	pub tech_stack: Vec<String>,
	pub important_files: Vec<String>,
	pub execution_flow: String,
	pub mind_map: MindMapData,
}

impl AnalyzeResponse {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const REPORT: &str = r#"{
		"summary": "A todo app.",
		"tech_stack": ["React", "FastAPI"],
		"important_files": ["src/App.tsx", "api/main.py"],
		"execution_flow": "1. Start server\n2. Serve UI",
		"mind_map": {
			"nodes": [
				{"id": "app", "label": "App.tsx", "type": "component"},
				{"id": "api", "label": "main.py", "type": "service"},
				{"id": "cfg", "label": "config.json"}
			],
			"edges": [{"source": "app", "target": "api"}]
		}
	}"#;

	#[test]
	fn decodes_a_full_report() {
		let report = AnalyzeResponse::from_json(REPORT).unwrap();
		assert_eq!(report.tech_stack, ["React", "FastAPI"]);
		assert_eq!(report.mind_map.nodes.len(), 3);
		assert_eq!(report.mind_map.nodes[2].kind, None);
		assert_eq!(report.mind_map.nodes[0].kind.as_deref(), Some("component"));
		assert_eq!(report.mind_map.edges[0].target, "api");
	}

	#[test]
	fn missing_fields_are_an_error() {
		assert!(AnalyzeResponse::from_json(r#"{"summary": "only this"}"#).is_err());
	}
}
