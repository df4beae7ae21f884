// The reference walk: one depth-first pass over a parsed source file.
//
// The walk registers import bindings and declarations as it descends,
// carries the enclosing-class and current-scope context down by value,
// and records an edge whenever the current scope references a name that
// is already known to the symbol or import table.

use anyhow::Result;
use tracing::{debug, warn};
use tree_sitter::{Node, Point, Tree};

use crate::domain::edge::EdgeStore;
use crate::domain::imports::ImportTable;
use crate::domain::resolver::{self, CalleeSlot};
use crate::domain::symbol::{SymbolKind, SymbolTable, GLOBAL_SCOPE};

/// Builds the caller/callee reference graph for one parsed file.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    /// Resolve markup tags against locally declared symbols as well as
    /// import aliases. Off by default: component usages conventionally
    /// point at imports.
    pub permissive_components: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permissive(mut self, enabled: bool) -> Self {
        self.permissive_components = enabled;
        self
    }

    /// Walk the tree and read the deduplicated edges back out as
    /// `[escaped_label, escaped_callee]` pairs in resolution order.
    ///
    /// All tables live for exactly one call; nothing is shared between
    /// files. A failure while reading node contents aborts this file's
    /// walk and yields an empty result rather than a crash.
    pub fn build_graph(&self, tree: &Tree, source: &str) -> Vec<[String; 2]> {
        let mut walk = Walk {
            source: source.as_bytes(),
            permissive: self.permissive_components,
            symbols: SymbolTable::new(),
            imports: ImportTable::new(),
            edges: EdgeStore::new(),
        };
        match walk.visit(tree.root_node(), &WalkContext::root()) {
            Ok(()) => {
                debug!(
                    symbols = walk.symbols.len(),
                    edges = walk.edges.len(),
                    "reference walk finished"
                );
                walk.edges.emit()
            }
            Err(error) => {
                warn!(%error, "reference walk aborted; emitting empty graph");
                Vec::new()
            }
        }
    }
}

/// Scope context threaded down the descent. Cloned per declaration so
/// sibling subtrees never observe each other's scope changes.
#[derive(Debug, Clone)]
struct WalkContext {
    enclosing_class: Option<String>,
    current_scope: String,
}

impl WalkContext {
    fn root() -> Self {
        Self {
            enclosing_class: None,
            current_scope: GLOBAL_SCOPE.to_string(),
        }
    }
}

struct Walk<'s> {
    source: &'s [u8],
    permissive: bool,
    symbols: SymbolTable,
    imports: ImportTable,
    edges: EdgeStore,
}

impl Walk<'_> {
    fn visit(&mut self, node: Node<'_>, ctx: &WalkContext) -> Result<()> {
        match node.kind() {
            "import_statement" => self.bind_imports(node),
            "function_declaration" | "generator_function_declaration" => {
                let mut next = ctx.clone();
                if let Some(name) = self.identifier_field(node, "name")? {
                    self.symbols
                        .declare(&name, line_of(node), SymbolKind::Function);
                    next.current_scope = name;
                }
                self.visit_children(node, &next)
            }
            "class_declaration" => {
                let mut next = ctx.clone();
                if let Some(name) = self.identifier_field(node, "name")? {
                    self.symbols.declare(&name, line_of(node), SymbolKind::Class);
                    next.enclosing_class = Some(name);
                }
                self.visit_children(node, &next)
            }
            "method_definition" => {
                let mut next = ctx.clone();
                if let Some(name) = self.method_name(node)? {
                    let dotted = match &ctx.enclosing_class {
                        Some(class) => format!("{class}.{name}"),
                        None => name,
                    };
                    self.symbols
                        .declare(&dotted, line_of(node), SymbolKind::Function);
                    next.current_scope = dotted;
                }
                self.visit_children(node, &next)
            }
            "variable_declarator" => self.visit_declarator(node, ctx),
            "call_expression" => {
                self.resolve_call(node, ctx)?;
                self.visit_children(node, ctx)
            }
            "jsx_element" | "jsx_self_closing_element" => {
                self.resolve_markup(node, ctx)?;
                self.visit_children(node, ctx)
            }
            "jsx_attribute" => {
                self.resolve_attribute(node, ctx)?;
                self.visit_children(node, ctx)
            }
            _ => self.visit_children(node, ctx),
        }
    }

    fn visit_children(&mut self, node: Node<'_>, ctx: &WalkContext) -> Result<()> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, ctx)?;
        }
        Ok(())
    }

    /// Named bindings initialized with a function value become declared
    /// scopes of their own; the binding name is captured here, on the way
    /// down, so the initializer subtree is walked under it.
    fn visit_declarator(&mut self, node: Node<'_>, ctx: &WalkContext) -> Result<()> {
        let name = self.identifier_field(node, "name")?;
        let value = node.child_by_field_name("value");
        let (Some(name), Some(value)) = (name, value) else {
            return self.visit_children(node, ctx);
        };

        match value.kind() {
            "arrow_function" | "function_expression" | "function" | "generator_function" => {
                let kind = if resolver::starts_uppercase(&name) {
                    SymbolKind::Component
                } else {
                    SymbolKind::Arrow
                };
                self.symbols.declare(&name, line_of(node), kind);
                let mut next = ctx.clone();
                next.current_scope = name;
                self.visit(value, &next)
            }
            // Factory-built bindings (`const Router = createRouter(...)`)
            // are component-like only by naming convention; the factory
            // call itself still resolves under the outer scope.
            "call_expression" | "new_expression" if resolver::starts_uppercase(&name) => {
                self.symbols
                    .declare(&name, line_of(node), SymbolKind::Variable);
                self.visit_children(node, ctx)
            }
            _ => self.visit_children(node, ctx),
        }
    }

    /// Register the local aliases an import statement introduces. The
    /// module path is dropped; aliases are all the resolver needs.
    fn bind_imports(&mut self, node: Node<'_>) -> Result<()> {
        let mut cursor = node.walk();
        for clause in node.named_children(&mut cursor) {
            if clause.kind() != "import_clause" {
                continue;
            }
            let mut clause_cursor = clause.walk();
            for item in clause.named_children(&mut clause_cursor) {
                match item.kind() {
                    // Default import binds its local name to itself.
                    "identifier" => {
                        let name = item.utf8_text(self.source)?;
                        self.imports.bind(name, name);
                    }
                    "namespace_import" => {
                        if let Some(alias) = self.first_identifier(item)? {
                            self.imports.bind(&alias, &alias);
                        }
                    }
                    "named_imports" => self.bind_named_imports(item)?,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn bind_named_imports(&mut self, node: Node<'_>) -> Result<()> {
        let mut cursor = node.walk();
        for specifier in node.named_children(&mut cursor) {
            if specifier.kind() != "import_specifier" {
                continue;
            }
            let Some(original) = specifier.child_by_field_name("name") else {
                continue;
            };
            let original = original.utf8_text(self.source)?;
            match specifier.child_by_field_name("alias") {
                Some(alias) => {
                    let alias = alias.utf8_text(self.source)?;
                    self.imports.bind(alias, original);
                }
                None => self.imports.bind(original, original),
            }
        }
        Ok(())
    }

    /// Rules 1 and 2: direct and chained calls, attributed to the
    /// current scope at the call site.
    fn resolve_call(&mut self, node: Node<'_>, ctx: &WalkContext) -> Result<()> {
        let Some(callee) = node.child_by_field_name("function") else {
            return Ok(());
        };
        match resolver::classify_callee(callee, self.source)? {
            CalleeSlot::Identifier(name) | CalleeSlot::MemberChain(name) => {
                self.record_direct(ctx, &name, node.start_position());
            }
            CalleeSlot::Other => {}
        }
        Ok(())
    }

    /// Rule 3: an uppercase markup tag is a component reference.
    fn resolve_markup(&mut self, node: Node<'_>, ctx: &WalkContext) -> Result<()> {
        let Some(tag) = resolver::markup_tag(node, self.source)? else {
            return Ok(());
        };
        if resolver::starts_uppercase(&tag) {
            self.record_markup(ctx, &tag, node.start_position());
        }
        Ok(())
    }

    /// Markup attributes carry component references in expression
    /// position. The `element` attribute resolves its embedded identifier
    /// or nested markup element like a direct reference from the same
    /// scope (route tables pass components as props); other attributes
    /// resolve embedded bare identifiers under the component rule.
    /// Embedded call expressions are picked up by the normal descent.
    fn resolve_attribute(&mut self, node: Node<'_>, ctx: &WalkContext) -> Result<()> {
        let name_node = node
            .child_by_field_name("name")
            .or_else(|| node.named_child(0));
        let Some(name_node) = name_node else {
            return Ok(());
        };
        let attr_name = name_node.utf8_text(self.source)?.to_string();

        let Some(inner) = self.attribute_expression(node) else {
            return Ok(());
        };

        if attr_name == "element" {
            match inner.kind() {
                "identifier" => {
                    let target = inner.utf8_text(self.source)?.to_string();
                    self.record_direct(ctx, &target, inner.start_position());
                }
                "jsx_element" | "jsx_self_closing_element" => {
                    if let Some(tag) = resolver::markup_tag(inner, self.source)? {
                        self.record_direct(ctx, &tag, inner.start_position());
                    }
                }
                _ => {}
            }
        } else if inner.kind() == "identifier" {
            let target = inner.utf8_text(self.source)?.to_string();
            if resolver::starts_uppercase(&target) {
                self.record_markup(ctx, &target, inner.start_position());
            }
        }
        Ok(())
    }

    /// The expression wrapped by an attribute value, if any.
    fn attribute_expression<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let expression = node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "jsx_expression")?;
        expression.named_child(0)
    }

    /// Direct-reference rule: the candidate must already be a declared
    /// symbol or a bound import alias. Forward references fail closed.
    /// Import aliases resolve through to the name they were imported as.
    fn record_direct(&mut self, ctx: &WalkContext, candidate: &str, position: Point) {
        let resolved = if self.symbols.has(candidate) {
            Some(candidate.to_string())
        } else {
            self.imports.resolve(candidate).map(str::to_string)
        };
        if let Some(callee) = resolved {
            self.record_edge(ctx, &callee, position);
        }
    }

    /// Component-reference rule: import aliases only, unless permissive
    /// resolution against local declarations is enabled.
    fn record_markup(&mut self, ctx: &WalkContext, candidate: &str, position: Point) {
        let resolved = match self.imports.resolve(candidate) {
            Some(original) => Some(original.to_string()),
            None if self.permissive && self.symbols.has(candidate) => {
                Some(candidate.to_string())
            }
            None => None,
        };
        if let Some(callee) = resolved {
            self.record_edge(ctx, &callee, position);
        }
    }

    fn record_edge(&mut self, ctx: &WalkContext, callee: &str, position: Point) {
        let location = format!("{}:{}", position.row + 1, position.column);
        if self
            .edges
            .insert_if_absent(&ctx.current_scope, callee, location)
        {
            self.symbols.record_outgoing_call(&ctx.current_scope, callee);
        }
    }

    fn identifier_field(&self, node: Node<'_>, field: &str) -> Result<Option<String>> {
        match node.child_by_field_name(field) {
            Some(child) if child.kind() == "identifier" => {
                Ok(Some(child.utf8_text(self.source)?.to_string()))
            }
            _ => Ok(None),
        }
    }

    fn method_name(&self, node: Node<'_>) -> Result<Option<String>> {
        match node.child_by_field_name("name") {
            Some(child) if child.kind() == "property_identifier" => {
                Ok(Some(child.utf8_text(self.source)?.to_string()))
            }
            _ => Ok(None),
        }
    }

    fn first_identifier(&self, node: Node<'_>) -> Result<Option<String>> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "identifier" {
                return Ok(Some(child.utf8_text(self.source)?.to_string()));
            }
        }
        Ok(None)
    }
}

/// 1-based declaration line; columns stay 0-based throughout.
fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}
