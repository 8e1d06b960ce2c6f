//! Option map parsing shared by the processors.

use serde::de::DeserializeOwned;

use super::error::PostProcessError;
use super::traits::ProcessorOptions;

/// Deserializes the recognized keys of an option map into a typed
/// option struct. Type mismatches on recognized keys surface as
/// [`PostProcessError::InvalidOption`].
pub(crate) fn parse_options<T: DeserializeOwned>(
    options: &ProcessorOptions,
) -> Result<T, PostProcessError> {
    serde_json::from_value(serde_json::Value::Object(options.clone()))
        .map_err(|err| PostProcessError::invalid_option(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default)]
        quality: Option<i64>,
    }

    fn map(value: serde_json::Value) -> ProcessorOptions {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_recognized_key_parsed() {
        let parsed: Sample = parse_options(&map(serde_json::json!({"quality": 80}))).unwrap();
        assert_eq!(parsed.quality, Some(80));
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let parsed: Sample =
            parse_options(&map(serde_json::json!({"quality": 80, "unknown": true}))).unwrap();
        assert_eq!(parsed.quality, Some(80));
    }

    #[test]
    fn test_type_mismatch_is_invalid_option() {
        let result: Result<Sample, _> =
            parse_options(&map(serde_json::json!({"quality": "high"})));
        assert!(matches!(
            result,
            Err(PostProcessError::InvalidOption { .. })
        ));
    }
}
