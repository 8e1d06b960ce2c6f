use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Resolver web root is not empty
/// - Configured tool executables are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.resolver.web_root.trim_matches('/').is_empty() {
        return Err(ConfigError::ValidationError(
            "resolver.web_root cannot be empty".to_string(),
        ));
    }

    let tools = [
        ("jpegoptim", &config.postprocess.jpegoptim),
        ("optipng", &config.postprocess.optipng),
        ("pngquant", &config.postprocess.pngquant),
    ];
    for (name, tool) in tools {
        if let Some(tool) = tool {
            if tool.executable.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "postprocess.{name}.executable cannot be empty"
                )));
            }
        }
    }

    Ok(())
}
