//! Writing documentation into the syntax tree.
//!
//! Insertion adds new leading trivia in front of a declaration's existing
//! leading trivia. Attributes, comments and blank lines already there keep
//! their order and content; the rest of the tree is shared with the input.

use docfill_config::RenderOptions;

use crate::annotation;
use crate::assemble::{DocContent, DocumentationBlock, Tag};
use crate::error::{DocfillError, Result};
use crate::syntax::{NodeId, SyntaxTree, Trivia};

/// Inserts `content` above the declaration `target`.
///
/// The block starts on a line of its own. Blank lines already in the leading
/// trivia stay between the block and the declaration. Returns the input tree
/// unchanged when the declaration already carries documentation, so repeated
/// passes never stack blocks.
pub fn insert_documentation(
    tree: &SyntaxTree,
    target: NodeId,
    content: &DocContent,
    options: &RenderOptions,
) -> Result<SyntaxTree> {
    let node = tree.find(target).ok_or(DocfillError::NodeNotFound(target))?;
    if node.first_token().is_none() {
        return Err(DocfillError::invalid_tree(format!(
            "declaration {target} has no tokens"
        )));
    }

    let leading = node.leading_trivia();
    if annotation::is_documented(leading) {
        tracing::debug!(%target, "declaration already documented, skipping insertion");
        return Ok(tree.clone());
    }

    // Trivia up to `split` finishes the previous line and stays in front.
    let starts_line = tree
        .starts_line(target)
        .ok_or(DocfillError::NodeNotFound(target))?;
    let split = if starts_line {
        0
    } else {
        leading
            .iter()
            .position(Trivia::is_end_of_line)
            .map_or(0, |idx| idx + 1)
    };
    let (before, after) = leading.split_at(split);

    let indent = indentation(after);
    let eol = options.line_ending.resolve(tree.line_ending());
    let lines = render_lines(content, options);

    let mut new_leading = Vec::with_capacity(lines.len() * 3 + leading.len() + 1);
    new_leading.extend(before.iter().cloned());
    if !starts_line && split == 0 {
        new_leading.push(Trivia::end_of_line(eol));
    }
    for line in lines {
        if !indent.is_empty() {
            new_leading.push(Trivia::whitespace(indent));
        }
        new_leading.push(Trivia::doc_comment(line));
        new_leading.push(Trivia::end_of_line(eol));
    }
    let inserted = new_leading.len() - split;
    new_leading.extend(after.iter().cloned());

    tracing::debug!(%target, inserted, split, indent = indent.len(), "inserting documentation");

    tree.replace_node(target, |node| node.with_leading_trivia(new_leading))
        .ok_or(DocfillError::NodeNotFound(target))
}

/// Indentation of the line the declaration starts on.
///
/// The nearest whitespace fragment in `leading` that starts a line; the first
/// fragment counts as starting a line. Empty when there is none.
pub fn indentation(leading: &[Trivia]) -> &str {
    leading
        .iter()
        .enumerate()
        .rev()
        .find(|(idx, trivia)| {
            trivia.is_whitespace() && (*idx == 0 || leading[idx - 1].is_end_of_line())
        })
        .map_or("", |(_, trivia)| trivia.text.as_str())
}

/// Comment lines for `content`, without indentation or line breaks.
pub fn render_lines(content: &DocContent, options: &RenderOptions) -> Vec<String> {
    let prefix = options.comment_prefix.trim_end();
    match content {
        DocContent::InheritMarker => {
            vec![format!("{prefix} {}", options.inherit_marker.trim())]
        }
        DocContent::Block(block) => render_block(block, prefix),
    }
}

fn render_block(block: &DocumentationBlock, prefix: &str) -> Vec<String> {
    block
        .tags()
        .iter()
        .map(|tag| format!("{prefix} {}", render_tag(tag)))
        .collect()
}

fn render_tag(tag: &Tag) -> String {
    let name = tag.name.as_str();
    let text = escape_text(&tag.text);
    match &tag.attribute {
        Some(attribute) => format!(
            "<{name} name=\"{}\">{text}</{name}>",
            escape_attribute(attribute)
        ),
        None => format!("<{name}>{text}</{name}>"),
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{BlockAssembler, TagName};
    use crate::symbol::{Parameter, ReturnClass, SymbolFacts, SymbolKind};
    use crate::syntax::{TreeBuilder, lex_trivia};
    use docfill_config::LineEnding;

    fn class_with_method(method_leading: &str) -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let method = b
            .declaration()
            .leading(method_leading)
            .token("public int ")
            .name("GetUserById")
            .token("(int id) => id;")
            .trailing("\n");
        let method_id = method.id();
        let class = b
            .declaration()
            .token("public class ")
            .name("Users")
            .trailing("\n")
            .token("{")
            .trailing("\n")
            .child(method.build())
            .token("}")
            .trailing("\n");
        (SyntaxTree::new(b.root().child(class.build()).build()), method_id)
    }

    fn user_block() -> DocContent {
        let symbol = SymbolFacts::new("GetUserById", SymbolKind::Method)
            .with_parameter(Parameter::new("id", "int", ReturnClass::Plain))
            .with_returns(ReturnClass::Plain);
        DocContent::Block(BlockAssembler::default().assemble(&symbol))
    }

    #[test]
    fn indentation_scan() {
        assert_eq!(indentation(&lex_trivia("    ")), "    ");
        assert_eq!(indentation(&lex_trivia("\t// note\n\t")), "\t");
        assert_eq!(indentation(&lex_trivia("\n\n  ")), "  ");
        assert_eq!(indentation(&lex_trivia("// note\n")), "");
        assert_eq!(indentation(&[]), "");
    }

    #[test]
    fn inserts_block_with_indentation() {
        let (tree, method) = class_with_method("    ");
        let edited = insert_documentation(&tree, method, &user_block(), &RenderOptions::default())
            .expect("insertion succeeds");

        assert_eq!(
            edited.text(),
            "public class Users\n{\n\
             \x20   /// <summary>Gets the user by id.</summary>\n\
             \x20   /// <param name=\"id\">The identifier.</param>\n\
             \x20   /// <returns>The user by id.</returns>\n\
             \x20   public int GetUserById(int id) => id;\n}\n"
        );
    }

    #[test]
    fn existing_comments_stay_below_the_block() {
        let (tree, method) = class_with_method("    // keep me\n\n    ");
        let edited = insert_documentation(
            &tree,
            method,
            &DocContent::InheritMarker,
            &RenderOptions::default(),
        )
        .expect("insertion succeeds");

        assert!(edited.text().contains(
            "    /// <inheritdoc/>\n    // keep me\n\n    public int GetUserById"
        ));
    }

    #[test]
    fn documented_declaration_is_left_alone() {
        let (tree, method) = class_with_method("    /// <summary>Existing.</summary>\n    ");
        let edited = insert_documentation(&tree, method, &user_block(), &RenderOptions::default())
            .expect("insertion succeeds");
        assert_eq!(edited, tree);
    }

    #[test]
    fn unknown_target_is_an_error() {
        let (tree, _) = class_with_method("    ");
        let err = insert_documentation(
            &tree,
            NodeId::new(404),
            &DocContent::InheritMarker,
            &RenderOptions::default(),
        )
        .expect_err("node does not exist");
        assert!(matches!(err, DocfillError::NodeNotFound(id) if id == NodeId::new(404)));
    }

    #[test]
    fn honours_configured_line_ending() {
        let (tree, method) = class_with_method("    ");
        let options = RenderOptions {
            line_ending: LineEnding::Crlf,
            ..RenderOptions::default()
        };
        let edited = insert_documentation(&tree, method, &DocContent::InheritMarker, &options)
            .expect("insertion succeeds");
        assert!(edited.text().contains("    /// <inheritdoc/>\r\n    public int"));
    }

    fn run_after_open_brace(method_leading: &str) -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let method = b
            .declaration()
            .leading(method_leading)
            .token("public void ")
            .name("Run")
            .token("() {}")
            .trailing("\n");
        let method_id = method.id();
        let class = b
            .declaration()
            .token("public class ")
            .name("C")
            .token("{")
            .child(method.build())
            .token("}");
        (SyntaxTree::new(b.root().child(class.build()).build()), method_id)
    }

    #[test]
    fn block_starts_after_line_break_in_leading_trivia() {
        let (tree, method) = run_after_open_brace("\n    ");
        let edited = insert_documentation(
            &tree,
            method,
            &DocContent::InheritMarker,
            &RenderOptions::default(),
        )
        .expect("insertion succeeds");
        assert_eq!(
            edited.text(),
            "public class C{\n    /// <inheritdoc/>\n    public void Run() {}\n}"
        );
    }

    #[test]
    fn trailing_comment_stays_on_previous_line() {
        let (tree, method) = run_after_open_brace(" // body\n\n  ");
        let edited = insert_documentation(
            &tree,
            method,
            &DocContent::InheritMarker,
            &RenderOptions::default(),
        )
        .expect("insertion succeeds");
        assert_eq!(
            edited.text(),
            "public class C{ // body\n  /// <inheritdoc/>\n\n  public void Run() {}\n}"
        );
    }

    #[test]
    fn declaration_sharing_a_line_is_moved_down() {
        let (tree, method) = run_after_open_brace("  ");
        let edited = insert_documentation(
            &tree,
            method,
            &DocContent::InheritMarker,
            &RenderOptions::default(),
        )
        .expect("insertion succeeds");
        assert_eq!(
            edited.text(),
            "public class C{\n  /// <inheritdoc/>\n  public void Run() {}\n}"
        );
    }

    #[test]
    fn inserted_text_reads_back_as_documentation() {
        let (tree, method) = class_with_method("    ");
        let edited = insert_documentation(&tree, method, &user_block(), &RenderOptions::default())
            .expect("insertion succeeds");
        let text = edited.text();
        let start = text.find("    ///").expect("block rendered");
        let end = text.find("public int").expect("declaration kept");
        assert!(annotation::is_documented(&lex_trivia(&text[start..end])));
    }

    #[test]
    fn escapes_markup_in_text_and_attributes() {
        let tag = Tag::named(TagName::Param, "a\"b", "List<T> & more");
        assert_eq!(
            render_tag(&tag),
            "<param name=\"a&quot;b\">List&lt;T&gt; &amp; more</param>"
        );
    }
}
