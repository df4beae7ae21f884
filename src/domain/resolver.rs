// Reference resolution rules.
//
// The callee slot of a call expression is classified once into a tagged
// variant at the syntax-tree boundary; the walker matches on the variant
// and never re-inspects the raw node shape.

use anyhow::Result;
use tree_sitter::Node;

/// The discriminated callee slot of a call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalleeSlot {
    /// A bare identifier: `foo()`.
    Identifier(String),
    /// A property-access chain over an identifier base: `a.b.c()`.
    MemberChain(String),
    /// Anything else (computed access, call results, `this`, ...).
    Other,
}

/// Classify the `function` child of a call expression.
pub fn classify_callee(node: Node<'_>, source: &[u8]) -> Result<CalleeSlot> {
    match node.kind() {
        "identifier" => Ok(CalleeSlot::Identifier(node.utf8_text(source)?.to_string())),
        "member_expression" => Ok(match member_chain(node, source)? {
            Some(dotted) => CalleeSlot::MemberChain(dotted),
            None => CalleeSlot::Other,
        }),
        _ => Ok(CalleeSlot::Other),
    }
}

/// Collect a member chain into its dotted name, walking from the
/// outermost property access inward and prefixing with the base
/// identifier: `a.b()` yields "a.b". Bases that are not plain
/// identifiers (subscripts, call results, `this`) yield None.
fn member_chain(node: Node<'_>, source: &[u8]) -> Result<Option<String>> {
    let mut parts = Vec::new();
    let mut current = node;
    loop {
        let Some(property) = current.child_by_field_name("property") else {
            return Ok(None);
        };
        if property.kind() != "property_identifier" {
            return Ok(None);
        }
        parts.push(property.utf8_text(source)?.to_string());

        let Some(object) = current.child_by_field_name("object") else {
            return Ok(None);
        };
        match object.kind() {
            "member_expression" => current = object,
            "identifier" => {
                parts.push(object.utf8_text(source)?.to_string());
                parts.reverse();
                return Ok(Some(parts.join(".")));
            }
            _ => return Ok(None),
        }
    }
}

/// Tag name of a markup element, when the opening tag is a plain
/// identifier. Dotted tags (`<Foo.Bar/>`) and namespaced tags are not
/// candidates.
pub fn markup_tag(node: Node<'_>, source: &[u8]) -> Result<Option<String>> {
    let opening = match node.kind() {
        "jsx_self_closing_element" => Some(node),
        "jsx_element" => node
            .child_by_field_name("open_tag")
            .or_else(|| node.child_by_field_name("opening_element")),
        _ => None,
    };
    let name_node = opening.and_then(|n| n.child_by_field_name("name"));
    match name_node {
        // The tag identifier kind differs between grammar releases.
        Some(n) if matches!(n.kind(), "identifier" | "jsx_identifier") => {
            Ok(Some(n.utf8_text(source)?.to_string()))
        }
        _ => Ok(None),
    }
}

/// Component-reference convention: tags and bindings whose name starts
/// with an uppercase letter.
pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}
