// src/syntax/early.rs
//! Early errors over an error-free tree.
//!
//! The tree-sitter grammar is a superset of what a module parse accepts: it
//! happily shapes sloppy-mode code (`with`, legacy octals, `delete x`), JSX,
//! redeclared bindings, stray `break`/`continue`, and `await` or `return` in
//! any position. This pass walks the tree once with a scope stack and a
//! function-context stack and reports the first such violation in document
//! order. [`ParseOptions`] decide the module goal and the top-level
//! `return`/`await` relaxations.

use std::collections::HashSet;
use std::mem;

use tree_sitter::Node;

use super::{ParseOptions, SourceType};

#[cfg(test)]
#[path = "early_test.rs"]
mod tests;

pub(crate) const MODULE_ONLY: &str =
    "'import' and 'export' may appear only with 'sourceType: module'";
pub(crate) const TOP_LEVEL_ONLY: &str = "'import' and 'export' may only appear at the top level";
pub(crate) const RETURN_OUTSIDE: &str = "'return' outside of function";
pub(crate) const AWAIT_OUTSIDE: &str = "Cannot use keyword 'await' outside an async function";
pub(crate) const YIELD_OUTSIDE: &str = "Cannot use 'yield' outside a generator function";
pub(crate) const WITH_STRICT: &str = "'with' in strict mode";
pub(crate) const INVALID_NUMBER: &str = "Invalid number";
pub(crate) const OCTAL_ESCAPE: &str = "Octal literal in strict mode";
pub(crate) const INVALID_ESCAPE: &str = "Invalid escape sequence";
pub(crate) const DELETE_LOCAL: &str = "Deleting local variable in strict mode";
pub(crate) const ARGUMENT_CLASH: &str = "Argument name clash";
pub(crate) const UNSYNTACTIC_BREAK: &str = "Unsyntactic break";
pub(crate) const UNSYNTACTIC_CONTINUE: &str = "Unsyntactic continue";
pub(crate) const JSX_TOKEN: &str = "Unexpected token `<`";

const STRICT_RESERVED: &[&str] = &[
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
];

const LOOP_KINDS: &[&str] = &[
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
];

/// First early error: zero-based row, byte column, message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyError {
    pub row: usize,
    pub column: usize,
    pub message: String,
}

/// Walks `root` and returns the first early error, if any.
///
/// `root` must come from a tree without `ERROR` or `MISSING` nodes.
pub fn first_early_error(root: Node, source: &str, options: &ParseOptions) -> Option<EarlyError> {
    let mut checker = EarlyChecker::new(source, options);
    checker.program(root);
    checker.found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Top,
    Function,
    Block,
    Catch,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    var: HashSet<String>,
    lexical: HashSet<String>,
    functions: HashSet<String>,
    catch_param: Option<String>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            var: HashSet::new(),
            lexical: HashSet::new(),
            functions: HashSet::new(),
            catch_param: None,
        }
    }

    fn is_var_scope(&self) -> bool {
        matches!(self.kind, ScopeKind::Top | ScopeKind::Function)
    }

    fn declares(&self, name: &str) -> bool {
        self.var.contains(name) || self.lexical.contains(name) || self.functions.contains(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Var,
    Lexical,
    /// Sloppy-mode function declaration.
    Function,
    SimpleCatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FnKind {
    Top,
    Function,
    StaticBlock,
}

#[derive(Debug)]
struct FnCtx {
    kind: FnKind,
    is_async: bool,
    is_generator: bool,
    strict: bool,
    loop_depth: usize,
    switch_depth: usize,
    /// Enclosing labels and whether each labels a loop.
    labels: Vec<(String, bool)>,
}

impl FnCtx {
    fn new(kind: FnKind, is_async: bool, is_generator: bool, strict: bool) -> Self {
        Self {
            kind,
            is_async,
            is_generator,
            strict,
            loop_depth: 0,
            switch_depth: 0,
            labels: Vec::new(),
        }
    }
}

// Module top-level functions are lexical; script and function-body ones hoist like `var`.
fn functions_as_var(kind: ScopeKind, module: bool) -> bool {
    kind == ScopeKind::Function || (kind == ScopeKind::Top && !module)
}

struct EarlyChecker<'t, 's> {
    source: &'s str,
    options: &'s ParseOptions,
    module: bool,
    scope: Scope,
    outer_scopes: Vec<Scope>,
    ctx: FnCtx,
    exported: HashSet<String>,
    local_exports: Vec<(String, Node<'t>)>,
    found: Option<EarlyError>,
}

impl<'t, 's> EarlyChecker<'t, 's> {
    fn new(source: &'s str, options: &'s ParseOptions) -> Self {
        let module = options.source_type == SourceType::Module;
        Self {
            source,
            options,
            module,
            scope: Scope::new(ScopeKind::Top),
            outer_scopes: Vec::new(),
            ctx: FnCtx::new(FnKind::Top, false, false, module),
            exported: HashSet::new(),
            local_exports: Vec::new(),
            found: None,
        }
    }

    fn program(&mut self, root: Node<'t>) {
        self.ctx.strict = self.module || has_use_strict(root, self.source);
        self.visit_children(root);
        if self.module {
            self.check_local_exports();
        }
    }

    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn report(&mut self, node: Node, message: impl Into<String>) {
        if self.found.is_none() {
            let pos = node.start_position();
            self.found = Some(EarlyError {
                row: pos.row,
                column: pos.column,
                message: message.into(),
            });
        }
    }

    fn visit_children(&mut self, node: Node<'t>) {
        for child in named_children(node) {
            if self.found.is_some() {
                return;
            }
            self.visit(child);
        }
    }

    fn visit(&mut self, node: Node<'t>) {
        if self.found.is_some() {
            return;
        }
        let kind = node.kind();
        if kind.starts_with("jsx_") {
            self.report(node, JSX_TOKEN);
            return;
        }
        match kind {
            "function_declaration" | "generator_function_declaration" => {
                self.function_declaration(node);
            }
            "function" | "function_expression" | "generator_function" | "arrow_function"
            | "method_definition" => self.function_like(node),
            "class_static_block" => self.static_block(node),
            "class_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare_node(name, Binding::Lexical);
                }
                self.visit_children(node);
            }
            "lexical_declaration" => self.declaration(node, Binding::Lexical),
            "variable_declaration" => self.declaration(node, Binding::Var),
            "statement_block" | "switch_body" => {
                self.with_scope(ScopeKind::Block, |c| c.visit_children(node));
            }
            "for_statement" => self.with_scope(ScopeKind::Block, |c| c.in_loop(node)),
            "for_in_statement" => self.for_in(node),
            "while_statement" | "do_statement" => self.in_loop(node),
            "switch_statement" => {
                self.ctx.switch_depth += 1;
                self.visit_children(node);
                self.ctx.switch_depth -= 1;
            }
            "catch_clause" => self.catch_clause(node),
            "labeled_statement" => self.labeled(node),
            "break_statement" => self.jump(node, false),
            "continue_statement" => self.jump(node, true),
            "return_statement" => {
                self.check_return(node);
                self.visit_children(node);
            }
            "await_expression" => {
                self.check_await(node);
                self.visit_children(node);
            }
            "yield_expression" => {
                if !(self.ctx.kind == FnKind::Function && self.ctx.is_generator) {
                    self.report(node, YIELD_OUTSIDE);
                }
                self.visit_children(node);
            }
            "with_statement" if self.ctx.strict => self.report(node, WITH_STRICT),
            "number" => self.check_number(node),
            "escape_sequence" => self.check_escape(node),
            "unary_expression" => {
                self.check_delete(node);
                self.visit_children(node);
            }
            "import_statement" => self.import(node),
            "export_statement" => self.export(node),
            _ => self.visit_children(node),
        }
    }

    fn with_scope(&mut self, kind: ScopeKind, f: impl FnOnce(&mut Self)) {
        let outer = mem::replace(&mut self.scope, Scope::new(kind));
        self.outer_scopes.push(outer);
        f(self);
        if let Some(outer) = self.outer_scopes.pop() {
            self.scope = outer;
        }
    }

    fn in_loop(&mut self, node: Node<'t>) {
        self.ctx.loop_depth += 1;
        self.visit_children(node);
        self.ctx.loop_depth -= 1;
    }

    fn at_top_level(&self) -> bool {
        self.ctx.kind == FnKind::Top && self.outer_scopes.is_empty()
    }

    // ---- declarations ----

    fn declaration(&mut self, node: Node<'t>, binding: Binding) {
        for declarator in named_children(node) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            if let Some(name) = declarator.child_by_field_name("name") {
                self.declare_pattern(name, binding);
            }
        }
        self.visit_children(node);
    }

    fn declare_pattern(&mut self, pattern: Node<'t>, binding: Binding) {
        for name in bound_names(pattern) {
            self.declare_node(name, binding);
        }
    }

    fn declare_node(&mut self, node: Node<'t>, binding: Binding) {
        let name = self.text(node);
        self.check_binding_name(node, name);
        let redeclared = match binding {
            Binding::Lexical => {
                let s = &mut self.scope;
                let clash = s.declares(name);
                s.lexical.insert(name.to_string());
                clash
            }
            Binding::SimpleCatch => {
                self.scope.lexical.insert(name.to_string());
                self.scope.catch_param = Some(name.to_string());
                false
            }
            Binding::Function => {
                let as_var = functions_as_var(self.scope.kind, self.module);
                let s = &mut self.scope;
                let clash = s.lexical.contains(name) || (!as_var && s.var.contains(name));
                s.functions.insert(name.to_string());
                clash
            }
            Binding::Var => self.declare_var(name),
        };
        if redeclared {
            self.report(node, format!("Identifier '{name}' has already been declared"));
        }
    }

    /// `var` hoists through block scopes up to the nearest function or top scope.
    fn declare_var(&mut self, name: &str) -> bool {
        let module = self.module;
        let scopes = std::iter::once(&mut self.scope).chain(self.outer_scopes.iter_mut().rev());
        for scope in scopes {
            let catch_param = scope.kind == ScopeKind::Catch
                && scope.catch_param.as_deref() == Some(name);
            if (scope.lexical.contains(name) && !catch_param)
                || (!functions_as_var(scope.kind, module) && scope.functions.contains(name))
            {
                return true;
            }
            scope.var.insert(name.to_string());
            if scope.is_var_scope() {
                break;
            }
        }
        false
    }

    fn check_binding_name(&mut self, node: Node, name: &str) {
        if !self.ctx.strict {
            return;
        }
        if STRICT_RESERVED.contains(&name) {
            self.report(node, format!("The keyword '{name}' is reserved"));
        } else if name == "eval" || name == "arguments" {
            self.report(node, format!("Binding {name} in strict mode"));
        }
    }

    // ---- functions ----

    fn function_declaration(&mut self, node: Node<'t>) {
        let is_async = has_token(node, "async");
        let is_generator = node.kind() == "generator_function_declaration";
        if let Some(name) = node.child_by_field_name("name") {
            let binding = if self.ctx.strict || is_async || is_generator {
                if functions_as_var(self.scope.kind, self.module) {
                    Binding::Var
                } else {
                    Binding::Lexical
                }
            } else {
                Binding::Function
            };
            self.declare_node(name, binding);
        }
        self.function_body(node, is_async, is_generator, false);
    }

    fn function_like(&mut self, node: Node<'t>) {
        let is_async = has_token(node, "async");
        let is_generator = node.kind() == "generator_function"
            || (node.kind() == "method_definition" && has_token(node, "*"));
        let in_class = node.parent().map_or(false, |p| p.kind() == "class_body");
        self.function_body(node, is_async, is_generator, in_class);
    }

    fn function_body(&mut self, node: Node<'t>, is_async: bool, is_generator: bool, strict: bool) {
        let body = node.child_by_field_name("body");
        let strict = strict
            || self.ctx.strict
            || body.map_or(false, |b| {
                b.kind() == "statement_block" && has_use_strict(b, self.source)
            });
        let inner = FnCtx::new(FnKind::Function, is_async, is_generator, strict);
        let outer = mem::replace(&mut self.ctx, inner);
        let is_arrow = node.kind() == "arrow_function";
        self.with_scope(ScopeKind::Function, |c| {
            c.parameters(node, is_arrow);
            // The body block shares the parameter scope.
            match body {
                Some(b) if b.kind() == "statement_block" => c.visit_children(b),
                Some(b) => c.visit(b),
                None => {}
            }
        });
        self.ctx = outer;
    }

    fn parameters(&mut self, node: Node<'t>, is_arrow: bool) {
        let params = if let Some(p) = node.child_by_field_name("parameter") {
            vec![p]
        } else if let Some(list) = node.child_by_field_name("parameters") {
            named_children(list)
        } else {
            Vec::new()
        };
        let simple = params.iter().all(|p| p.kind() == "identifier");
        let mut seen = HashSet::new();
        for name_node in params.iter().flat_map(|p| bound_names(*p)) {
            let name = self.text(name_node);
            if !seen.insert(name) && (self.ctx.strict || is_arrow || !simple) {
                self.report(name_node, ARGUMENT_CLASH);
            }
            self.check_binding_name(name_node, name);
            self.scope.var.insert(name.to_string());
        }
        for p in params {
            self.visit(p);
        }
    }

    fn static_block(&mut self, node: Node<'t>) {
        let outer = mem::replace(&mut self.ctx, FnCtx::new(FnKind::StaticBlock, false, false, true));
        self.with_scope(ScopeKind::Function, |c| c.visit_children(node));
        self.ctx = outer;
    }

    fn check_return(&mut self, node: Node) {
        let allowed = match self.ctx.kind {
            FnKind::Function => true,
            FnKind::StaticBlock => false,
            FnKind::Top => self.options.allow_return_outside_function,
        };
        if !allowed {
            self.report(node, RETURN_OUTSIDE);
        }
    }

    /// `await` needs the nearest enclosing function to be async.
    fn check_await(&mut self, node: Node) {
        let allowed = match self.ctx.kind {
            FnKind::Function => self.ctx.is_async,
            FnKind::StaticBlock => false,
            FnKind::Top => self.options.allow_await_outside_function,
        };
        if !allowed {
            self.report(node, AWAIT_OUTSIDE);
        }
    }

    // ---- statements ----

    fn for_in(&mut self, node: Node<'t>) {
        self.with_scope(ScopeKind::Block, |c| {
            if let (Some(kind), Some(left)) =
                (node.child_by_field_name("kind"), node.child_by_field_name("left"))
            {
                let binding = if kind.kind() == "var" {
                    Binding::Var
                } else {
                    Binding::Lexical
                };
                c.declare_pattern(left, binding);
            }
            c.in_loop(node);
        });
    }

    fn catch_clause(&mut self, node: Node<'t>) {
        self.with_scope(ScopeKind::Catch, |c| {
            if let Some(param) = node.child_by_field_name("parameter") {
                if param.kind() == "identifier" {
                    c.declare_node(param, Binding::SimpleCatch);
                } else {
                    c.declare_pattern(param, Binding::Lexical);
                    c.visit(param);
                }
            }
            // A catch body shares the parameter scope.
            if let Some(body) = node.child_by_field_name("body") {
                c.visit_children(body);
            }
        });
    }

    fn labeled(&mut self, node: Node<'t>) {
        let Some(label) = node.child_by_field_name("label") else {
            self.visit_children(node);
            return;
        };
        let name = self.text(label);
        if self.ctx.labels.iter().any(|(l, _)| l == name) {
            self.report(label, format!("Label '{name}' is already declared"));
            return;
        }
        let body = node
            .child_by_field_name("body")
            .or_else(|| node.named_child(node.named_child_count().saturating_sub(1)));
        let is_loop = body.map_or(false, |b| LOOP_KINDS.contains(&b.kind()));
        self.ctx.labels.push((name.to_string(), is_loop));
        self.visit_children(node);
        self.ctx.labels.pop();
    }

    fn jump(&mut self, node: Node, is_continue: bool) {
        let ok = match node.child_by_field_name("label") {
            Some(label) => {
                let name = self.text(label);
                self.ctx
                    .labels
                    .iter()
                    .any(|(l, is_loop)| l == name && (*is_loop || !is_continue))
            }
            None => self.ctx.loop_depth > 0 || (!is_continue && self.ctx.switch_depth > 0),
        };
        if !ok {
            let message = if is_continue {
                UNSYNTACTIC_CONTINUE
            } else {
                UNSYNTACTIC_BREAK
            };
            self.report(node, message);
        }
    }

    // ---- strict-mode literals and operators ----

    /// `010` and `08` are sloppy-only.
    fn check_number(&mut self, node: Node) {
        let bytes = self.text(node).as_bytes();
        if self.ctx.strict && bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit() {
            self.report(node, INVALID_NUMBER);
        }
    }

    fn check_escape(&mut self, node: Node) {
        if !self.ctx.strict || node.parent().map_or(true, |p| p.kind() != "string") {
            return;
        }
        let body = self.text(node).get(1..).unwrap_or("");
        if body.starts_with(|c: char| ('0'..='7').contains(&c)) {
            let next = self.source.as_bytes().get(node.end_byte()).copied();
            // `\0` alone is NUL; `\0` before 8 or 9 still reads as octal.
            if body != "0" || matches!(next, Some(b'8' | b'9')) {
                self.report(node, OCTAL_ESCAPE);
            }
        } else if body == "8" || body == "9" {
            self.report(node, INVALID_ESCAPE);
        }
    }

    fn check_delete(&mut self, node: Node) {
        if !self.ctx.strict {
            return;
        }
        let is_delete = node
            .child_by_field_name("operator")
            .map_or(false, |op| op.kind() == "delete");
        let Some(mut arg) = node.child_by_field_name("argument") else {
            return;
        };
        while arg.kind() == "parenthesized_expression" {
            match arg.named_child(0) {
                Some(inner) => arg = inner,
                None => break,
            }
        }
        if is_delete && arg.kind() == "identifier" {
            self.report(node, DELETE_LOCAL);
        }
    }

    // ---- module declarations ----

    fn import(&mut self, node: Node<'t>) {
        if !self.module {
            self.report(node, MODULE_ONLY);
            return;
        }
        if !self.at_top_level() {
            self.report(node, TOP_LEVEL_ONLY);
            return;
        }
        for local in import_bindings(node) {
            self.declare_node(local, Binding::Lexical);
        }
    }

    fn export(&mut self, node: Node<'t>) {
        if !self.module {
            self.report(node, MODULE_ONLY);
            return;
        }
        if !self.at_top_level() {
            self.report(node, TOP_LEVEL_ONLY);
            return;
        }
        let from_source = node.child_by_field_name("source").is_some();
        let is_default = has_token(node, "default");
        let is_star = has_token(node, "*");
        if is_default {
            self.add_export("default", node);
        } else if let Some(decl) = node.child_by_field_name("declaration") {
            for name in declared_names(decl) {
                self.add_export(self.text(name), name);
            }
        }
        for child in named_children(node) {
            match child.kind() {
                "export_clause" => {
                    for spec in named_children(child) {
                        let Some(local) = spec.child_by_field_name("name") else {
                            continue;
                        };
                        let exported = spec.child_by_field_name("alias").unwrap_or(local);
                        self.add_export(unquote(self.text(exported)), exported);
                        if !from_source {
                            let local_name = self.text(local).to_string();
                            self.local_exports.push((local_name, local));
                        }
                    }
                }
                "namespace_export" | "namespace_import" => {
                    let last = child.named_child_count().saturating_sub(1);
                    if let Some(name) = child.named_child(last) {
                        self.add_export(unquote(self.text(name)), name);
                    }
                }
                // Older grammars leave `export * as ns` unwrapped.
                "identifier" if is_star => self.add_export(self.text(child), child),
                _ => {}
            }
        }
        self.visit_children(node);
    }

    fn add_export(&mut self, name: &str, node: Node) {
        if !self.exported.insert(name.to_string()) {
            self.report(node, format!("Duplicate export '{name}'"));
        }
    }

    /// `export { x }` without `from` must name a top-level binding.
    fn check_local_exports(&mut self) {
        for (name, node) in mem::take(&mut self.local_exports) {
            if !self.scope.declares(&name) {
                self.report(node, format!("Export '{name}' is not defined"));
            }
        }
    }
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == token);
    found
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}

/// Directive prologue of a program or function body contains `"use strict"`.
fn has_use_strict(body: Node, source: &str) -> bool {
    for stmt in named_children(body) {
        if stmt.kind() != "expression_statement" {
            return false;
        }
        let Some(expr) = stmt.named_child(0) else {
            return false;
        };
        if expr.kind() != "string" {
            return false;
        }
        let text = expr.utf8_text(source.as_bytes()).unwrap_or("");
        if text.get(1..text.len().saturating_sub(1)) == Some("use strict") {
            return true;
        }
    }
    false
}

/// Identifier nodes bound by a declaration target or parameter.
fn bound_names(node: Node) -> Vec<Node> {
    let mut out = Vec::new();
    collect_bound(node, &mut out);
    out
}

fn collect_bound<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => out.push(node),
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_bound(left, out);
            }
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                collect_bound(value, out);
            }
        }
        "rest_pattern" | "object_pattern" | "array_pattern" => {
            for child in named_children(node) {
                collect_bound(child, out);
            }
        }
        _ => {}
    }
}

/// Names introduced by an exported declaration.
fn declared_names(decl: Node) -> Vec<Node> {
    match decl.kind() {
        "function_declaration" | "generator_function_declaration" | "class_declaration" => {
            decl.child_by_field_name("name").into_iter().collect()
        }
        "lexical_declaration" | "variable_declaration" => named_children(decl)
            .into_iter()
            .filter_map(|d| d.child_by_field_name("name"))
            .flat_map(bound_names)
            .collect(),
        _ => Vec::new(),
    }
}

/// Local bindings created by an import declaration.
fn import_bindings(node: Node) -> Vec<Node> {
    let mut out = Vec::new();
    for clause in named_children(node) {
        if clause.kind() != "import_clause" {
            continue;
        }
        for part in named_children(clause) {
            match part.kind() {
                "identifier" => out.push(part),
                "namespace_import" => out.extend(
                    named_children(part)
                        .into_iter()
                        .filter(|n| n.kind() == "identifier"),
                ),
                "named_imports" => {
                    for spec in named_children(part) {
                        if let Some(local) = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"))
                        {
                            out.push(local);
                        }
                    }
                }
                _ => {}
            }
        }
    }
    out
}
