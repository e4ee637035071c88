//! A small TypeScript syntax tree
//!
//! Only the constructs the generator emits are modelled. Every node renders
//! through [`std::fmt::Display`]; declarations render with four-space
//! indentation and a trailing newline.

use crate::naming::{property_key, string_literal};
use std::fmt;

const INDENT: &str = "    ";

/// A type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    String,
    Number,
    Boolean,
    Unknown,
    Void,
    Undefined,
    /// A named type with optional type arguments
    Reference { name: String, arguments: Vec<TypeNode> },
    /// `Array<T>`
    Array(Box<TypeNode>),
    /// `Record<string, T>`
    Record(Box<TypeNode>),
    Union(Vec<TypeNode>),
    StringLiteral(String),
    /// `typeof x`
    TypeOf(String),
    /// Inline object type
    Literal(Vec<PropertySignature>),
}

impl TypeNode {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeNode>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            arguments,
        }
    }

    /// `T | undefined`; a type that already admits `undefined` is unchanged
    pub fn or_undefined(self) -> Self {
        match self {
            TypeNode::Undefined | TypeNode::Unknown => self,
            TypeNode::Union(mut members) => {
                if !members.contains(&TypeNode::Undefined) {
                    members.push(TypeNode::Undefined);
                }
                TypeNode::Union(members)
            }
            other => TypeNode::Union(vec![other, TypeNode::Undefined]),
        }
    }

    /// Union of the nodes; a single node is returned as is
    pub fn union(mut members: Vec<TypeNode>) -> Self {
        match members.len() {
            0 => TypeNode::Unknown,
            1 => members.remove(0),
            _ => TypeNode::Union(members),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::String => f.write_str("string"),
            TypeNode::Number => f.write_str("number"),
            TypeNode::Boolean => f.write_str("boolean"),
            TypeNode::Unknown => f.write_str("unknown"),
            TypeNode::Void => f.write_str("void"),
            TypeNode::Undefined => f.write_str("undefined"),
            TypeNode::Reference { name, arguments } => {
                f.write_str(name)?;
                if !arguments.is_empty() {
                    write!(f, "<{}>", join(arguments, ", "))?;
                }
                Ok(())
            }
            TypeNode::Array(items) => write!(f, "Array<{items}>"),
            TypeNode::Record(values) => write!(f, "Record<string, {values}>"),
            TypeNode::Union(members) => f.write_str(&join(members, " | ")),
            TypeNode::StringLiteral(value) => f.write_str(&string_literal(value)),
            TypeNode::TypeOf(name) => write!(f, "typeof {name}"),
            TypeNode::Literal(members) => {
                if members.is_empty() {
                    return f.write_str("{}");
                }
                write!(f, "{{ {} }}", join(members, "; "))
            }
        }
    }
}

/// `name?: Type` member of an interface or object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    pub name: String,
    pub optional: bool,
    pub ty: TypeNode,
}

impl fmt::Display for PropertySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.optional { "?" } else { "" };
        write!(f, "{}{marker}: {}", property_key(&self.name), self.ty)
    }
}

/// `T extends Bound = Default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
            default: None,
        }
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(constraint) = &self.constraint {
            write!(f, " extends {constraint}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// A function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
    pub ty: TypeNode,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.optional { "?" } else { "" };
        write!(f, "{}{marker}: {}", self.name, self.ty)
    }
}

/// A class body member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    /// `declare readonly name: Type;`
    DeclaredField { name: String, ty: TypeNode },
    /// `static override readonly name = value;`
    StaticField { name: String, value: String },
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Interface {
        name: String,
        type_parameters: Vec<TypeParameter>,
        extends: Vec<TypeNode>,
        members: Vec<PropertySignature>,
    },
    TypeAlias {
        name: String,
        type_parameters: Vec<TypeParameter>,
        ty: TypeNode,
    },
    /// String enum whose member values equal their names
    Enum { name: String, members: Vec<String> },
    /// `async function` with a single-statement body
    AsyncFunction {
        name: String,
        parameters: Vec<Parameter>,
        return_type: TypeNode,
        body: String,
    },
    Class {
        name: String,
        type_parameters: Vec<TypeParameter>,
        extends: TypeNode,
        members: Vec<ClassMember>,
    },
    ExportDefault(String),
    /// `export { local as exported, ... };`
    ExportNamed(Vec<(String, String)>),
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Interface {
                name,
                type_parameters,
                extends,
                members,
            } => {
                write!(f, "interface {name}{}", type_parameter_list(type_parameters))?;
                if !extends.is_empty() {
                    write!(f, " extends {}", join(extends, ", "))?;
                }
                f.write_str(" {\n")?;
                for member in members {
                    writeln!(f, "{INDENT}{member};")?;
                }
                f.write_str("}\n")
            }
            Declaration::TypeAlias {
                name,
                type_parameters,
                ty,
            } => writeln!(f, "type {name}{} = {ty};", type_parameter_list(type_parameters)),
            Declaration::Enum { name, members } => {
                writeln!(f, "enum {name} {{")?;
                let last = members.len().saturating_sub(1);
                for (i, member) in members.iter().enumerate() {
                    let separator = if i == last { "" } else { "," };
                    writeln!(
                        f,
                        "{INDENT}{} = {}{separator}",
                        property_key(member),
                        string_literal(member)
                    )?;
                }
                f.write_str("}\n")
            }
            Declaration::AsyncFunction {
                name,
                parameters,
                return_type,
                body,
            } => {
                writeln!(
                    f,
                    "async function {name}({}): {return_type} {{",
                    join(parameters, ", ")
                )?;
                writeln!(f, "{INDENT}{body}")?;
                f.write_str("}\n")
            }
            Declaration::Class {
                name,
                type_parameters,
                extends,
                members,
            } => {
                writeln!(
                    f,
                    "class {name}{} extends {extends} {{",
                    type_parameter_list(type_parameters)
                )?;
                for member in members {
                    match member {
                        ClassMember::DeclaredField { name, ty } => {
                            writeln!(f, "{INDENT}declare readonly {}: {ty};", property_key(name))?
                        }
                        ClassMember::StaticField { name, value } => {
                            writeln!(f, "{INDENT}static override readonly {name} = {value};")?
                        }
                    }
                }
                f.write_str("}\n")
            }
            Declaration::ExportDefault(name) => writeln!(f, "export default {name};"),
            Declaration::ExportNamed(names) => {
                let specifiers: Vec<String> = names
                    .iter()
                    .map(|(local, exported)| {
                        if local == exported {
                            local.clone()
                        } else {
                            format!("{local} as {exported}")
                        }
                    })
                    .collect();
                writeln!(f, "export {{ {} }};", specifiers.join(", "))
            }
        }
    }
}

fn type_parameter_list(parameters: &[TypeParameter]) -> String {
    if parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", join(parameters, ", "))
    }
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
#[path = "ast/ast_tests.rs"]
mod ast_tests;
