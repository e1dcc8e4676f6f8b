//! Syntax tree produced by the parser, before normalization.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaAst {
    pub models: Vec<ModelDecl>,
    pub enums: Vec<EnumDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    /// Block attributes (`@@id`, `@@unique`, ...)
    pub attributes: Vec<Attribute>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: TypeRef,
    pub attributes: Vec<Attribute>,
    pub line: usize,
}

impl FieldDecl {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Declared type with its modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: String,
    pub optional: bool,
    pub list: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<String>,
}

/// `@name(args)` or `@@name(args)`. Dotted names such as `db.VarChar` are
/// joined with `.`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub args: Vec<Argument>,
}

impl Attribute {
    /// Argument by name, falling back to the first positional argument when
    /// `positional_fallback` is set.
    pub fn arg(&self, name: &str, positional_fallback: bool) -> Option<&Expr> {
        self.args
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .or_else(|| {
                if positional_fallback {
                    self.args.iter().find(|a| a.name.is_none())
                } else {
                    None
                }
            })
            .map(|a| &a.value)
    }

    /// First positional argument.
    pub fn first(&self) -> Option<&Expr> {
        self.args.iter().find(|a| a.name.is_none()).map(|a| &a.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Num(String),
    Ident(String),
    Call { name: String, args: Vec<Argument> },
    List(Vec<Expr>),
}

impl Expr {
    /// Identifiers of a list expression (`[a, b]`), or of a single identifier.
    pub fn ident_list(&self) -> Vec<String> {
        match self {
            Expr::Ident(name) => vec![name.clone()],
            Expr::List(items) => items
                .iter()
                .filter_map(|item| match item {
                    Expr::Ident(name) => Some(name.clone()),
                    Expr::Call { name, .. } => Some(name.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Source-like rendering of the expression.
    pub fn to_literal(&self) -> String {
        match self {
            Expr::Str(s) => format!("\"{s}\""),
            Expr::Num(n) => n.clone(),
            Expr::Ident(name) => name.clone(),
            Expr::Call { name, args } => {
                let rendered: Vec<String> = args
                    .iter()
                    .map(|a| match &a.name {
                        Some(n) => format!("{n}: {}", a.value.to_literal()),
                        None => a.value.to_literal(),
                    })
                    .collect();
                format!("{name}({})", rendered.join(", "))
            }
            Expr::List(items) => {
                let rendered: Vec<String> = items.iter().map(Expr::to_literal).collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }
}
