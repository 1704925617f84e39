use crate::renderer::components::*;
use crate::renderer::traits::*;
use crate::tree::RenderInstruction;

impl Render for RenderInstruction {
    fn render(&self, context: &RenderContext) -> String {
        let mut output = String::new();
        let indent = context.indent(self.depth);
        let nested_indent = context.indent(self.depth + 1);
        let marker = MarkerRenderer.marker(NodeShape::of(self), context.markers);

        output.push_str(&format!("{}{} {}\n", indent, marker, self.label));

        // Comment bodies sit one level under their author line
        output.push_str(&DetailRenderer.render_detail(self.detail.as_deref(), &nested_indent));

        if self.truncated {
            output.push_str(&format!("{}{}\n", nested_indent, CONTINUE_THREAD));
        }

        output
    }
}
