use crate::renderer::traits::*;
use crate::tree::RenderInstruction;

/// Affordance shown in place of replies cut off by the depth budget.
pub const CONTINUE_THREAD: &str = "Continue thread →";

/// Visual state of a node, as far as its marker is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Leaf,
    Collapsed,
    Expanded,
}

impl NodeShape {
    pub fn of(instruction: &RenderInstruction) -> Self {
        match (instruction.has_children, instruction.is_expanded) {
            (false, _) => NodeShape::Leaf,
            (true, false) => NodeShape::Collapsed,
            (true, true) => NodeShape::Expanded,
        }
    }
}

/// Helper for picking node markers
pub struct MarkerRenderer;

impl MarkerRenderer {
    pub fn marker(&self, shape: NodeShape, style: MarkerStyle) -> &'static str {
        match (style, shape) {
            (MarkerStyle::Ascii, NodeShape::Leaf) => "-",
            (MarkerStyle::Ascii, NodeShape::Collapsed) => "+",
            (MarkerStyle::Ascii, NodeShape::Expanded) => "v",
            (MarkerStyle::Icons, NodeShape::Leaf) => "📄",
            (MarkerStyle::Icons, NodeShape::Collapsed) => "📁",
            (MarkerStyle::Icons, NodeShape::Expanded) => "📂",
        }
    }
}

/// Helper for rendering multi-line node details (comment bodies)
pub struct DetailRenderer;

impl DetailRenderer {
    pub fn render_detail(&self, detail: Option<&str>, indent: &str) -> String {
        let Some(detail) = detail else {
            return String::new();
        };

        let mut output = String::new();
        for line in detail.lines() {
            if line.trim().is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("{}{}\n", indent, line));
            }
        }
        output
    }
}
