use anyhow::{Context, Result};

use crate::renderer::traits::*;
use crate::tree::RenderInstruction;

/// Assembles the output for a whole traversal.
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn render(
        &self,
        instructions: &[RenderInstruction],
        context: &RenderContext,
    ) -> Result<String> {
        match context.format {
            OutputFormat::Text => Ok(instructions
                .iter()
                .map(|instruction| instruction.render(context))
                .collect()),
            OutputFormat::Json => {
                let mut output = serde_json::to_string_pretty(instructions)
                    .context("failed to serialize render instructions")?;
                output.push('\n');
                Ok(output)
            }
        }
    }
}
