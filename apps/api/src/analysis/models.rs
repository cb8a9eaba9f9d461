use serde::{Deserialize, Deserializer, Serialize};

/// Structured resume assessment returned by both analysis paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0 to 100. Model output is rounded and clamped into range.
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub keywords_to_add: Vec<String>,
    #[serde(default)]
    pub grammar_and_formatting: Vec<String>,
    #[serde(default)]
    pub recommended_changes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_analysis: Option<bool>,
}

/// Returned when the model answered but its output held no usable JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawAnalysis {
    pub raw_analysis: String,
    pub model_used: String,
    pub note: String,
}

/// Body of a successful `/analyze_resume` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Structured(AnalysisResult),
    Degraded(RawAnalysis),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("score must be a finite number"));
    }
    Ok(value.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_model_payload_deserializes() {
        let json = r#"{
            "score": 85,
            "summary": "Strong backend engineer",
            "strengths": ["Rust", "Distributed systems"],
            "weaknesses": ["No metrics"],
            "keywords_to_add": ["Kubernetes"],
            "grammar_and_formatting": ["Use consistent tense"],
            "recommended_changes": ["Quantify impact"]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, 85);
        assert_eq!(result.strengths.len(), 2);
        assert_eq!(result.model_used, None);
        assert_eq!(result.fallback_analysis, None);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result: AnalysisResult = serde_json::from_str(r#"{"score": 70}"#).unwrap();
        assert_eq!(result.summary, "");
        assert!(result.strengths.is_empty());
        assert!(result.recommended_changes.is_empty());
    }

    #[test]
    fn test_score_is_rounded_and_clamped() {
        let r: AnalysisResult = serde_json::from_str(r#"{"score": 72.6}"#).unwrap();
        assert_eq!(r.score, 73);
        let r: AnalysisResult = serde_json::from_str(r#"{"score": 140}"#).unwrap();
        assert_eq!(r.score, 100);
        let r: AnalysisResult = serde_json::from_str(r#"{"score": -5}"#).unwrap();
        assert_eq!(r.score, 0);
    }

    #[test]
    fn test_missing_or_non_numeric_score_is_rejected() {
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"summary": "x"}"#).is_err());
        assert!(serde_json::from_str::<AnalysisResult>(r#"{"score": "high"}"#).is_err());
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let result: AnalysisResult = serde_json::from_str(r#"{"score": 50}"#).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("model_used").is_none());
        assert!(json.get("fallback_analysis").is_none());
    }

    #[test]
    fn test_degraded_response_serializes_flat() {
        let response = AnalysisResponse::Degraded(RawAnalysis {
            raw_analysis: "Looks good".to_string(),
            model_used: "models/gemini-pro".to_string(),
            note: "Could not parse JSON from response".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["raw_analysis"], "Looks good");
        assert_eq!(json["model_used"], "models/gemini-pro");
        assert!(json.get("score").is_none());
    }
}
