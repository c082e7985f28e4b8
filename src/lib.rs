//! Inline emphasis and code span resolution with CommonMark delimiter rules

mod arena;
pub mod ast;
pub mod delimiter;
mod emphasis;
pub mod error;
pub mod options;
pub mod parser;
pub mod renderer;

pub use ast::{Document, EmphasisKind, Node, Span};
pub use error::ConfigError;
pub use options::Options;
pub use parser::Parser;
pub use renderer::HtmlRenderer;

/// Parse inline markup with all extensions enabled.
pub fn parse(input: &str) -> Document<'_> {
    Parser::new().parse(input)
}

/// Parse inline markup and render it to tagged text.
pub fn render(input: &str) -> String {
    render_with_options(input, &Options::default())
}

pub fn render_with_options(input: &str, options: &Options) -> String {
    let document = Parser::with_options(options.clone()).parse(input);
    HtmlRenderer::new().render(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_text_without_markup_is_unchanged() {
        let input = "plain <text> & 123, no markup.";
        assert_eq!(render(input), input);
    }

    #[test]
    fn test_mixed_kinds() {
        assert_eq!(
            render("*a* **b** _c_ __d__ ~~e~~ ||f|| `g`"),
            "<em>a</em> <strong>b</strong> <em>c</em> <uline>d</uline> <del>e</del> <spoiler>f</spoiler> <code>g</code>"
        );
    }

    #[test]
    fn test_commonmark_options_leave_extensions_literal() {
        assert_eq!(
            render_with_options("~~a~~ ||b||", &Options::commonmark()),
            "~~a~~ ||b||"
        );
    }

    #[test]
    fn test_parse_then_render() {
        let document = parse("_a_");
        assert_eq!(document.nodes.len(), 1);
        assert_eq!(HtmlRenderer::new().render(&document), "<em>a</em>");
    }
}
