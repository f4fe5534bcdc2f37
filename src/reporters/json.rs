//! JSON reporter
//!
//! Outputs the full DevMeterResult as pretty-printed JSON, with the same
//! camelCase keys the HTTP API returns.

use crate::models::DevMeterResult;
use anyhow::Result;

/// Render result as JSON
pub fn render(result: &DevMeterResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render several results as a JSON array
pub fn render_all(results: &[DevMeterResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_result;

    #[test]
    fn test_json_render_keys() {
        let json_str = render(&test_result()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["userGithubId"], "583231");
        assert_eq!(parsed["devMeterTier"], "Elite");
        assert_eq!(parsed["reviewToPRRatio"], 1.5);
        assert_eq!(parsed["languages"].as_array().expect("languages").len(), 2);
    }

    #[test]
    fn test_json_render_empty_list() {
        assert_eq!(render_all(&[]).expect("render JSON").trim(), "[]");
    }
}
