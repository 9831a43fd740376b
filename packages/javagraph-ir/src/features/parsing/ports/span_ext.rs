use tree_sitter::Node as TSNode;

use crate::shared::models::Span;

pub trait SpanExt {
    fn to_span(&self) -> Span;
}

impl SpanExt for TSNode<'_> {
    fn to_span(&self) -> Span {
        Span::new(
            self.start_position().row as u32 + 1,
            self.start_position().column as u32,
            self.end_position().row as u32 + 1,
            self.end_position().column as u32,
        )
    }
}
