//! AST node type definitions.
//!
//! The node set here is deliberately small: it covers exactly the constructs the
//! parser runtime needs to exercise its own contract (ordered choice, memoization,
//! string/f-string decoding, argument list construction) plus one opaque variant
//! for shapes a demo grammar wants to build but that the runtime itself never
//! inspects (`BinOp`, `Assign`, `ImportFrom`, and similar).

use std::fmt;

use pegen_source::types::Span;

/// A type-safe identifier for nodes in the AST arena.
///
/// `NodeID` is a handle that uniquely identifies a node in the arena. It includes
/// a generation counter to prevent use-after-free bugs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeID {
    /// The index of the node in the arena.
    pub(crate) index: u32,
    /// The generation counter for this node.
    pub(crate) generation: u32,
}

impl NodeID {
    /// Creates a new `NodeID` with the given index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self { Self { index, generation } }

    /// Creates a placeholder `NodeID` for struct initialization.
    ///
    /// This is used when creating AST node structs that need an ID field
    /// before being allocated. The actual `NodeID` returned by `alloc_node()`
    /// should be used for references.
    #[must_use]
    pub const fn placeholder() -> Self { Self { index: 0, generation: 0 } }

    /// Returns the index of this node.
    #[must_use]
    pub const fn index(&self) -> u32 { self.index }

    /// Returns the generation of this node.
    #[must_use]
    pub const fn generation(&self) -> u32 { self.generation }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeID({}, {})", self.index, self.generation)
    }
}

/// Expression context, mirroring the three ways a name-like expression can be used.
///
/// `set_expr_context` walks an already-built expression and replaces its context
/// in place; see `pegen-parser`'s AST-construction helpers for the structural
/// cases it recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    Load,
    Store,
    Del,
}

/// The constant value carried by a `Constant` node.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Ellipsis,
}

/// Comparison operator, one per comparator in a chained `Compare` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

/// A single formal parameter inside an `Arguments` node.
///
/// Kept as a plain field of `Arguments` rather than its own `AnyNode` variant:
/// a parameter is never a free-standing expression in its own right, it only
/// ever appears inside one of the six argument-list buckets.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub annotation: Option<NodeID>,
    pub span: Span,
}

impl Param {
    #[must_use]
    pub const fn new(name: String, annotation: Option<NodeID>, span: Span) -> Self {
        Self { name, annotation, span }
    }
}

/// A name reference (e.g. `x`, used as target or load).
#[derive(Debug, Clone)]
pub struct Name {
    pub value: String,
    pub ctx: ExprContext,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Name {
    #[must_use]
    pub const fn new(value: String, ctx: ExprContext, id: NodeID, span: Span) -> Self {
        Self { value, ctx, id, parent: None, span }
    }
}

impl ASTNode for Name {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Name }

    fn span(&self) -> Span { self.span }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.value) }
}

/// A literal constant (e.g. `42`, `"hello"`, `True`, `...`).
#[derive(Debug, Clone)]
pub struct Constant {
    pub value: ConstantValue,
    /// Python's `ast.Constant.kind`: `Some("u")` for a `u"..."`-prefixed
    /// string literal, `None` otherwise. Carried through so a generated
    /// AST can distinguish `u"x"` from `"x"` even though both decode to
    /// the same `ConstantValue::Str`.
    pub kind: Option<String>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Constant {
    #[must_use]
    pub const fn new(value: ConstantValue, id: NodeID, span: Span) -> Self {
        Self { value, kind: None, id, parent: None, span }
    }

    #[must_use]
    pub const fn with_kind(value: ConstantValue, kind: Option<String>, id: NodeID, span: Span) -> Self {
        Self { value, kind, id, parent: None, span }
    }
}

impl ASTNode for Constant {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Constant }

    fn span(&self) -> Span { self.span }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ConstantValue::None => write!(f, "None"),
            ConstantValue::Bool(v) => write!(f, "{v}"),
            ConstantValue::Int(v) => write!(f, "{v}"),
            ConstantValue::Float(v) => write!(f, "{v}"),
            ConstantValue::Str(v) => write!(f, "{v:?}"),
            ConstantValue::Bytes(v) => write!(f, "{v:?}"),
            ConstantValue::Ellipsis => write!(f, "..."),
        }
    }
}

/// A tuple display (e.g. `(a, b)` as an expression, or an assignment target).
#[derive(Debug, Clone)]
pub struct Tuple {
    pub elements: Vec<NodeID>,
    pub ctx: ExprContext,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Tuple {
    #[must_use]
    pub const fn new(elements: Vec<NodeID>, ctx: ExprContext, id: NodeID, span: Span) -> Self {
        Self { elements, ctx, id, parent: None, span }
    }
}

impl ASTNode for Tuple {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Tuple }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { self.elements.clone() }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tuple(len: {})", self.elements.len())
    }
}

/// A list display (e.g. `[a, b]` as an expression, or an assignment target).
#[derive(Debug, Clone)]
pub struct List {
    pub elements: Vec<NodeID>,
    pub ctx: ExprContext,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl List {
    #[must_use]
    pub const fn new(elements: Vec<NodeID>, ctx: ExprContext, id: NodeID, span: Span) -> Self {
        Self { elements, ctx, id, parent: None, span }
    }
}

impl ASTNode for List {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::List }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { self.elements.clone() }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List(len: {})", self.elements.len())
    }
}

/// A subscript operation (e.g. `arr[idx]`).
#[derive(Debug, Clone, Copy)]
pub struct Subscript {
    pub value: NodeID,
    pub slice: NodeID,
    pub ctx: ExprContext,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Subscript {
    #[must_use]
    pub const fn new(
        value: NodeID,
        slice: NodeID,
        ctx: ExprContext,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { value, slice, ctx, id, parent: None, span }
    }
}

impl ASTNode for Subscript {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Subscript }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { vec![self.value, self.slice] }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Subscript") }
}

/// An attribute access (e.g. `obj.attr`).
#[derive(Debug, Clone)]
pub struct Attribute {
    pub value: NodeID,
    pub attr: String,
    pub ctx: ExprContext,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Attribute {
    #[must_use]
    pub const fn new(
        value: NodeID,
        attr: String,
        ctx: ExprContext,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { value, attr, ctx, id, parent: None, span }
    }
}

impl ASTNode for Attribute {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Attribute }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { vec![self.value] }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Attribute({})", self.attr) }
}

/// A starred expression (e.g. `*args` in a call or assignment target).
#[derive(Debug, Clone, Copy)]
pub struct Starred {
    pub value: NodeID,
    pub ctx: ExprContext,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Starred {
    #[must_use]
    pub const fn new(value: NodeID, ctx: ExprContext, id: NodeID, span: Span) -> Self {
        Self { value, ctx, id, parent: None, span }
    }
}

impl ASTNode for Starred {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Starred }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { vec![self.value] }
}

impl fmt::Display for Starred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Starred") }
}

/// A chained comparison (e.g. `a < b <= c`).
#[derive(Debug, Clone)]
pub struct Compare {
    pub left: NodeID,
    pub ops: Vec<CmpOp>,
    pub comparators: Vec<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Compare {
    #[must_use]
    pub const fn new(
        left: NodeID,
        ops: Vec<CmpOp>,
        comparators: Vec<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { left, ops, comparators, id, parent: None, span }
    }
}

impl ASTNode for Compare {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Compare }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> {
        let mut children = Vec::with_capacity(1 + self.comparators.len());
        children.push(self.left);
        children.extend(&self.comparators);
        children
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compare(ops: {})", self.ops.len())
    }
}

/// The six argument-list buckets a call site's arguments get partitioned into.
///
/// Mirrors `make_arguments`'s mapping table: positional-only, regular, `*args`,
/// keyword-only (each with its own optional default), `**kwargs`, and the
/// trailing run of defaults for the regular parameters.
#[derive(Debug, Clone)]
pub struct Arguments {
    pub posonlyargs: Vec<Param>,
    pub args: Vec<Param>,
    pub vararg: Option<Param>,
    pub kwonlyargs: Vec<Param>,
    pub kw_defaults: Vec<Option<NodeID>>,
    pub kwarg: Option<Param>,
    pub defaults: Vec<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Arguments {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        posonlyargs: Vec<Param>,
        args: Vec<Param>,
        vararg: Option<Param>,
        kwonlyargs: Vec<Param>,
        kw_defaults: Vec<Option<NodeID>>,
        kwarg: Option<Param>,
        defaults: Vec<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self {
            posonlyargs,
            args,
            vararg,
            kwonlyargs,
            kw_defaults,
            kwarg,
            defaults,
            id,
            parent: None,
            span,
        }
    }
}

impl ASTNode for Arguments {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Arguments }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> {
        let mut children = Vec::new();
        for param in self.posonlyargs.iter().chain(&self.args).chain(&self.kwonlyargs) {
            children.extend(param.annotation);
        }
        if let Some(p) = &self.vararg {
            children.extend(p.annotation);
        }
        if let Some(p) = &self.kwarg {
            children.extend(p.annotation);
        }
        children.extend(self.kw_defaults.iter().flatten());
        children.extend(&self.defaults);
        children
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arguments(pos: {}, args: {}, kwonly: {})",
            self.posonlyargs.len(),
            self.args.len(),
            self.kwonlyargs.len()
        )
    }
}

/// A function definition (`def name(args): body`).
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub args: NodeID,
    pub body: Vec<NodeID>,
    pub decorator_list: Vec<NodeID>,
    pub returns: Option<NodeID>,
    pub is_async: bool,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl FunctionDef {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: String,
        args: NodeID,
        body: Vec<NodeID>,
        decorator_list: Vec<NodeID>,
        returns: Option<NodeID>,
        is_async: bool,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, args, body, decorator_list, returns, is_async, id, parent: None, span }
    }
}

impl ASTNode for FunctionDef {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::FunctionDef }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> {
        let mut children = self.decorator_list.clone();
        children.push(self.args);
        children.extend(self.returns);
        children.extend(&self.body);
        children
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionDef({})", self.name)
    }
}

/// A class definition (`class name(bases): body`).
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<NodeID>,
    pub keywords: Vec<NodeID>,
    pub body: Vec<NodeID>,
    pub decorator_list: Vec<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl ClassDef {
    #[must_use]
    pub const fn new(
        name: String,
        bases: Vec<NodeID>,
        keywords: Vec<NodeID>,
        body: Vec<NodeID>,
        decorator_list: Vec<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, bases, keywords, body, decorator_list, id, parent: None, span }
    }
}

impl ASTNode for ClassDef {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::ClassDef }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> {
        let mut children = self.decorator_list.clone();
        children.extend(&self.bases);
        children.extend(&self.keywords);
        children.extend(&self.body);
        children
    }
}

impl fmt::Display for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ClassDef({})", self.name) }
}

/// An import alias (e.g. the `b as c` in `import a.b as c` or `from x import b as c`).
#[derive(Debug, Clone)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Alias {
    #[must_use]
    pub const fn new(name: String, asname: Option<String>, id: NodeID, span: Span) -> Self {
        Self { name, asname, id, parent: None, span }
    }
}

impl ASTNode for Alias {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Alias }

    fn span(&self) -> Span { self.span }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.asname {
            Some(asname) => write!(f, "{} as {asname}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// An f-string conversion character (`!s`, `!r`, `!a`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    None,
    Str,
    Repr,
    Ascii,
}

/// A single interpolated `{expr}` inside a `JoinedStr`.
#[derive(Debug, Clone)]
pub struct FormattedValue {
    pub value: NodeID,
    pub conversion: Conversion,
    pub format_spec: Option<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl FormattedValue {
    #[must_use]
    pub const fn new(
        value: NodeID,
        conversion: Conversion,
        format_spec: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { value, conversion, format_spec, id, parent: None, span }
    }
}

impl ASTNode for FormattedValue {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::FormattedValue }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> {
        let mut children = vec![self.value];
        children.extend(self.format_spec);
        children
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "FormattedValue") }
}

/// An assembled f-string: an alternation of literal-text `Constant`s and `FormattedValue`s.
///
/// `concatenate_strings` flattens any run of adjacent string literals containing at
/// least one f-string into a single node of this shape.
#[derive(Debug, Clone)]
pub struct JoinedStr {
    pub values: Vec<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl JoinedStr {
    #[must_use]
    pub const fn new(values: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { values, id, parent: None, span }
    }
}

impl ASTNode for JoinedStr {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::JoinedStr }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { self.values.clone() }
}

impl fmt::Display for JoinedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JoinedStr(parts: {})", self.values.len())
    }
}

/// The root node of a parsed module: a flat statement list.
#[derive(Debug, Clone)]
pub struct Module {
    pub body: Vec<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Module {
    #[must_use]
    pub const fn new(body: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { body, id, parent: None, span }
    }
}

impl ASTNode for Module {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Module }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { self.body.clone() }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Module(stmts: {})", self.body.len())
    }
}

/// A generic escape-hatch node for grammar rules that build shapes the runtime
/// itself has no contract with (e.g. a demo grammar's `BinOp`, `Assign`, `ImportFrom`).
///
/// `tag` names the construct for display/debugging purposes only; the runtime
/// never branches on it.
#[derive(Debug, Clone)]
pub struct Opaque {
    pub tag: String,
    pub children: Vec<NodeID>,
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub span: Span,
}

impl Opaque {
    #[must_use]
    pub const fn new(tag: String, children: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { tag, children, id, parent: None, span }
    }
}

impl ASTNode for Opaque {
    fn id(&self) -> NodeID { self.id }

    fn parent(&self) -> Option<NodeID> { self.parent }

    fn with_parent(mut self, parent: NodeID) -> Self {
        self.parent = Some(parent);
        self
    }

    fn kind(&self) -> NodeKind { NodeKind::Opaque }

    fn span(&self) -> Span { self.span }

    fn children(&self) -> Vec<NodeID> { self.children.clone() }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.tag) }
}

/// Main AST node type - discriminated union over all recognized node variants.
#[derive(Debug, Clone)]
pub enum AnyNode {
    Name(Name),
    Constant(Constant),
    Tuple(Tuple),
    List(List),
    Subscript(Subscript),
    Attribute(Attribute),
    Starred(Starred),
    Compare(Compare),
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    Arguments(Arguments),
    Alias(Alias),
    JoinedStr(JoinedStr),
    FormattedValue(FormattedValue),
    Module(Module),
    Opaque(Opaque),
}

/// Dispatches a method call to whichever concrete node the variant holds.
///
/// One macro, expanded at a single call site per method, beats hand-copying
/// the same sixteen-armed match four times over.
macro_rules! dispatch {
    ($self:expr, $node:ident => $body:expr) => {
        match $self {
            Self::Name($node) => $body,
            Self::Constant($node) => $body,
            Self::Tuple($node) => $body,
            Self::List($node) => $body,
            Self::Subscript($node) => $body,
            Self::Attribute($node) => $body,
            Self::Starred($node) => $body,
            Self::Compare($node) => $body,
            Self::FunctionDef($node) => $body,
            Self::ClassDef($node) => $body,
            Self::Arguments($node) => $body,
            Self::Alias($node) => $body,
            Self::JoinedStr($node) => $body,
            Self::FormattedValue($node) => $body,
            Self::Module($node) => $body,
            Self::Opaque($node) => $body,
        }
    };
}

impl AnyNode {
    /// Returns a reference to the [`Name`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_name(&self) -> Option<&Name> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Constant`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Tuple`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Self::Tuple(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`List`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Subscript`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_subscript(&self) -> Option<&Subscript> {
        match self {
            Self::Subscript(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Attribute`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Starred`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_starred(&self) -> Option<&Starred> {
        match self {
            Self::Starred(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Compare`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_compare(&self) -> Option<&Compare> {
        match self {
            Self::Compare(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`FunctionDef`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_function_def(&self) -> Option<&FunctionDef> {
        match self {
            Self::FunctionDef(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`ClassDef`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_class_def(&self) -> Option<&ClassDef> {
        match self {
            Self::ClassDef(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Arguments`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_arguments(&self) -> Option<&Arguments> {
        match self {
            Self::Arguments(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Alias`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_alias(&self) -> Option<&Alias> {
        match self {
            Self::Alias(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`JoinedStr`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_joined_str(&self) -> Option<&JoinedStr> {
        match self {
            Self::JoinedStr(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`FormattedValue`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_formatted_value(&self) -> Option<&FormattedValue> {
        match self {
            Self::FormattedValue(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Module`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_module(&self) -> Option<&Module> {
        match self {
            Self::Module(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a reference to the [`Opaque`] this variant holds, if it holds one.
    #[must_use]
    pub const fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(n) => Some(n),
            _ => None,
        }
    }
}

/// A trait for AST nodes that can be stored in the arena.
pub trait ASTNode: fmt::Display {
    /// Returns the kind of this node.
    fn kind(&self) -> NodeKind;

    /// Returns the span of this node in the source code.
    fn span(&self) -> Span;

    /// Returns the children of this node.
    fn children(&self) -> Vec<NodeID> { vec![] }

    /// Returns the ID of this node.
    fn id(&self) -> NodeID;

    /// Returns the parent of this node, if it has one.
    fn parent(&self) -> Option<NodeID>;

    /// Builder pattern method to set the parent of this node.
    #[must_use]
    fn with_parent(self, parent: NodeID) -> Self;
}

impl ASTNode for AnyNode {
    fn kind(&self) -> NodeKind { dispatch!(self, n => n.kind()) }

    fn span(&self) -> Span { dispatch!(self, n => n.span()) }

    fn children(&self) -> Vec<NodeID> { dispatch!(self, n => n.children()) }

    fn id(&self) -> NodeID { dispatch!(self, n => n.id()) }

    fn parent(&self) -> Option<NodeID> { dispatch!(self, n => n.parent()) }

    fn with_parent(self, parent: NodeID) -> Self {
        match self {
            Self::Name(n) => Self::Name(n.with_parent(parent)),
            Self::Constant(n) => Self::Constant(n.with_parent(parent)),
            Self::Tuple(n) => Self::Tuple(n.with_parent(parent)),
            Self::List(n) => Self::List(n.with_parent(parent)),
            Self::Subscript(n) => Self::Subscript(n.with_parent(parent)),
            Self::Attribute(n) => Self::Attribute(n.with_parent(parent)),
            Self::Starred(n) => Self::Starred(n.with_parent(parent)),
            Self::Compare(n) => Self::Compare(n.with_parent(parent)),
            Self::FunctionDef(n) => Self::FunctionDef(n.with_parent(parent)),
            Self::ClassDef(n) => Self::ClassDef(n.with_parent(parent)),
            Self::Arguments(n) => Self::Arguments(n.with_parent(parent)),
            Self::Alias(n) => Self::Alias(n.with_parent(parent)),
            Self::JoinedStr(n) => Self::JoinedStr(n.with_parent(parent)),
            Self::FormattedValue(n) => Self::FormattedValue(n.with_parent(parent)),
            Self::Module(n) => Self::Module(n.with_parent(parent)),
            Self::Opaque(n) => Self::Opaque(n.with_parent(parent)),
        }
    }
}

impl fmt::Display for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { dispatch!(self, n => n.fmt(f)) }
}

/// Per-construct node categorization, used for arena queries and type-mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Name,
    Constant,
    Tuple,
    List,
    Subscript,
    Attribute,
    Starred,
    Compare,
    FunctionDef,
    ClassDef,
    Arguments,
    Alias,
    JoinedStr,
    FormattedValue,
    Module,
    Opaque,
}

/// The node structure that contains common metadata and node-specific data.
#[derive(Debug, Clone)]
pub struct Node {
    /// The kind of node
    pub kind: NodeKind,
    /// Node-specific data
    pub data: AnyNode,
    /// Source code span
    pub span: Span,
    /// Parent node reference
    pub parent: Option<NodeID>,
}
