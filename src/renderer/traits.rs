use std::str::FromStr;

use serde::Deserialize;

/// Configuration context for rendering operations
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub indent_width: usize,
    pub markers: MarkerStyle,
    pub format: OutputFormat,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            indent_width: 2,
            markers: MarkerStyle::Ascii,
            format: OutputFormat::Text,
        }
    }

    pub fn with_indent_width(self, indent_width: usize) -> Self {
        Self {
            indent_width,
            ..self
        }
    }

    pub fn with_markers(self, markers: MarkerStyle) -> Self {
        Self { markers, ..self }
    }

    pub fn with_format(self, format: OutputFormat) -> Self {
        Self { format, ..self }
    }

    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format `{}` (expected text or json)", other)),
        }
    }
}

/// Glyph set used for the leaf / collapsed / expanded markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    #[default]
    Ascii,
    Icons,
}

/// Turns one visited node into the text block the host prints.
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}
