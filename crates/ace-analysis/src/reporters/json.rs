//! JSON reporter: the trigger result as pretty-printed camelCase JSON.

use super::Reporter;
use crate::enforcement::HookTriggerResult;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, result: &HookTriggerResult) -> Result<String, String> {
        serde_json::to_string_pretty(result).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
