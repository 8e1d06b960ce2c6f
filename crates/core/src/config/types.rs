use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::path::{ResolverError, WebPathResolver, DEFAULT_CACHE_PREFIX};
use crate::postprocess::{
    JpegoptimPostProcessor, OptipngPostProcessor, PngquantPostProcessor, PostProcessor,
    ToolConfig,
};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub postprocess: PostProcessConfig,
}

impl Config {
    /// Builds the path resolver described by this configuration.
    pub fn build_resolver(&self) -> Result<WebPathResolver, ResolverError> {
        WebPathResolver::new(
            self.resolver.web_root.as_str(),
            self.resolver.cache_prefix.as_str(),
        )
    }
}

/// Path resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Web root directory cached assets are served from.
    pub web_root: String,

    /// Cache prefix under the web root.
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,
}

fn default_cache_prefix() -> String {
    DEFAULT_CACHE_PREFIX.to_string()
}

/// Post-processor configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostProcessConfig {
    /// Shared temporary root applied to tools without their own.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    #[serde(default)]
    pub jpegoptim: Option<ToolConfig>,

    #[serde(default)]
    pub optipng: Option<ToolConfig>,

    #[serde(default)]
    pub pngquant: Option<ToolConfig>,
}

impl PostProcessConfig {
    fn shared_temp(&self, mut tool: ToolConfig) -> ToolConfig {
        if tool.temp_dir.is_none() {
            tool.temp_dir = self.temp_dir.clone();
        }
        tool
    }

    /// Instantiates every configured post-processor.
    pub fn build_processors(&self) -> Vec<Arc<dyn PostProcessor>> {
        let mut processors: Vec<Arc<dyn PostProcessor>> = Vec::new();
        if let Some(tool) = &self.jpegoptim {
            processors.push(Arc::new(JpegoptimPostProcessor::new(
                self.shared_temp(tool.clone()),
            )));
        }
        if let Some(tool) = &self.optipng {
            processors.push(Arc::new(OptipngPostProcessor::new(
                self.shared_temp(tool.clone()),
            )));
        }
        if let Some(tool) = &self.pngquant {
            processors.push(Arc::new(PngquantPostProcessor::new(
                self.shared_temp(tool.clone()),
            )));
        }
        processors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_prefix_default() {
        let config: ResolverConfig =
            toml::from_str("web_root = \"/srv/web\"").unwrap();
        assert_eq!(config.cache_prefix, "media/cache");
    }

    #[test]
    fn test_build_processors_in_declaration_order() {
        let config = PostProcessConfig {
            temp_dir: Some(PathBuf::from("/var/tmp/pixcache")),
            jpegoptim: Some(ToolConfig::new("/usr/bin/jpegoptim")),
            optipng: None,
            pngquant: Some(ToolConfig::new("/usr/bin/pngquant")),
        };
        let processors = config.build_processors();
        let names: Vec<&str> = processors.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["jpegoptim", "pngquant"]);
    }

    #[test]
    fn test_shared_temp_dir_applies_when_tool_has_none() {
        let config = PostProcessConfig {
            temp_dir: Some(PathBuf::from("/var/tmp/shared")),
            jpegoptim: Some(ToolConfig::new("jpegoptim")),
            optipng: Some(
                ToolConfig::new("optipng").with_temp_dir("/var/tmp/own"),
            ),
            pngquant: None,
        };
        let shared = config.shared_temp(config.jpegoptim.clone().unwrap());
        assert_eq!(shared.temp_dir, Some(PathBuf::from("/var/tmp/shared")));
        let own = config.shared_temp(config.optipng.clone().unwrap());
        assert_eq!(own.temp_dir, Some(PathBuf::from("/var/tmp/own")));
    }
}
