//! JVM generic signature grammar
//!
//! Parses the `Signature` attribute strings stored in class files (JVMS 4.7.9.1)
//! and the plain field/method descriptors they generalise:
//!
//! - field type signatures: `Ljava/util/List<Ljava/lang/String;>;`, `[I`, `TT;`
//! - class signatures: `<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/io/Serializable;`
//! - method signatures: `<T:Ljava/lang/Object;>(TT;I)Ljava/util/List<TT;>;^TE;`
//!
//! Class names are returned in dotted binary form (`java.util.Map$Entry`).

use crate::error::{ModelError, ModelResult};
use std::fmt;

/// Primitive types plus `void`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
}

impl BaseType {
    pub fn from_descriptor(c: char) -> Option<Self> {
        match c {
            'B' => Some(BaseType::Byte),
            'C' => Some(BaseType::Char),
            'D' => Some(BaseType::Double),
            'F' => Some(BaseType::Float),
            'I' => Some(BaseType::Int),
            'J' => Some(BaseType::Long),
            'S' => Some(BaseType::Short),
            'Z' => Some(BaseType::Boolean),
            'V' => Some(BaseType::Void),
            _ => None,
        }
    }

    pub fn descriptor(self) -> char {
        match self {
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
            BaseType::Boolean => 'Z',
            BaseType::Void => 'V',
        }
    }

    /// Source-level keyword
    pub fn keyword(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
            BaseType::Void => "void",
        }
    }
}

/// A parsed type signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JvmType {
    Base(BaseType),
    Array(Box<JvmType>),
    TypeVariable(String),
    Class(JvmClassType),
}

/// A class type with its type arguments.
///
/// For inner classes of generic outer classes only the innermost arguments
/// are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JvmClassType {
    pub name: String,
    pub type_arguments: Vec<JvmTypeArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JvmTypeArgument {
    /// `*`
    Any,
    Exact(JvmType),
    /// `+Type`
    Extends(JvmType),
    /// `-Type`
    Super(JvmType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JvmTypeParameter {
    pub name: String,
    pub class_bound: Option<JvmType>,
    pub interface_bounds: Vec<JvmType>,
}

impl JvmTypeParameter {
    /// Class bound followed by interface bounds
    pub fn bounds(&self) -> impl Iterator<Item = &JvmType> {
        self.class_bound.iter().chain(self.interface_bounds.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JvmClassSignature {
    pub type_parameters: Vec<JvmTypeParameter>,
    pub superclass: JvmType,
    pub interfaces: Vec<JvmType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JvmMethodSignature {
    pub type_parameters: Vec<JvmTypeParameter>,
    pub parameters: Vec<JvmType>,
    pub result: JvmType,
    pub throws: Vec<JvmType>,
}

impl JvmType {
    pub fn class(name: impl Into<String>) -> Self {
        JvmType::Class(JvmClassType {
            name: name.into(),
            type_arguments: Vec::new(),
        })
    }
}

/// Parse a field type signature or field descriptor
pub fn parse_field_signature(signature: &str) -> ModelResult<JvmType> {
    let mut cursor = Cursor::new(signature);
    let ty = cursor.java_type(false)?;
    cursor.finish()?;
    Ok(ty)
}

/// Parse a class signature
pub fn parse_class_signature(signature: &str) -> ModelResult<JvmClassSignature> {
    let mut cursor = Cursor::new(signature);
    let type_parameters = cursor.type_parameters()?;
    let superclass = cursor.class_type()?;
    let mut interfaces = Vec::new();
    while !cursor.at_end() {
        interfaces.push(cursor.class_type()?);
    }
    Ok(JvmClassSignature {
        type_parameters,
        superclass,
        interfaces,
    })
}

/// Parse a method signature or method descriptor
pub fn parse_method_signature(signature: &str) -> ModelResult<JvmMethodSignature> {
    let mut cursor = Cursor::new(signature);
    let type_parameters = cursor.type_parameters()?;
    cursor.expect('(')?;
    let mut parameters = Vec::new();
    while cursor.peek() != Some(')') {
        parameters.push(cursor.java_type(false)?);
    }
    cursor.expect(')')?;
    let result = cursor.java_type(true)?;
    let mut throws = Vec::new();
    while cursor.peek() == Some('^') {
        cursor.advance();
        let thrown = match cursor.peek() {
            Some('T') => cursor.type_variable()?,
            _ => cursor.class_type()?,
        };
        throws.push(thrown);
    }
    cursor.finish()?;
    Ok(JvmMethodSignature {
        type_parameters,
        parameters,
        result,
        throws,
    })
}

struct Cursor<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> ModelError {
        ModelError::MalformedSignature {
            signature: self.text.to_string(),
            position: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn expect(&mut self, expected: char) -> ModelResult<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => {
                self.pos -= 1;
                Err(self.error(format!("expected '{expected}', found '{c}'")))
            }
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn finish(&self) -> ModelResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing characters"))
        }
    }

    fn identifier(&mut self) -> ModelResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '.' | ';' | '[' | '/' | '<' | '>' | ':') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn java_type(&mut self, allow_void: bool) -> ModelResult<JvmType> {
        match self.peek() {
            Some('L') => self.class_type(),
            Some('T') => self.type_variable(),
            Some('[') => {
                self.advance();
                Ok(JvmType::Array(Box::new(self.java_type(false)?)))
            }
            Some(c) => match BaseType::from_descriptor(c) {
                Some(BaseType::Void) if !allow_void => Err(self.error("void is only valid as a result")),
                Some(base) => {
                    self.advance();
                    Ok(JvmType::Base(base))
                }
                None => Err(self.error(format!("unexpected '{c}'"))),
            },
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn reference_type(&mut self) -> ModelResult<JvmType> {
        match self.peek() {
            Some('L') => self.class_type(),
            Some('T') => self.type_variable(),
            Some('[') => {
                self.advance();
                Ok(JvmType::Array(Box::new(self.java_type(false)?)))
            }
            _ => Err(self.error("expected reference type")),
        }
    }

    fn type_variable(&mut self) -> ModelResult<JvmType> {
        self.expect('T')?;
        let name = self.identifier()?;
        self.expect(';')?;
        Ok(JvmType::TypeVariable(name))
    }

    fn class_type(&mut self) -> ModelResult<JvmType> {
        self.expect('L')?;
        let mut name = String::new();
        let mut segment = self.identifier()?;
        while self.peek() == Some('/') {
            self.advance();
            name.push_str(&segment);
            name.push('.');
            segment = self.identifier()?;
        }
        name.push_str(&segment);
        let mut type_arguments = self.type_arguments()?;
        while self.peek() == Some('.') {
            self.advance();
            name.push('$');
            name.push_str(&self.identifier()?);
            type_arguments = self.type_arguments()?;
        }
        self.expect(';')?;
        Ok(JvmType::Class(JvmClassType {
            name,
            type_arguments,
        }))
    }

    fn type_arguments(&mut self) -> ModelResult<Vec<JvmTypeArgument>> {
        let mut arguments = Vec::new();
        if self.peek() != Some('<') {
            return Ok(arguments);
        }
        self.advance();
        while self.peek() != Some('>') {
            let argument = match self.peek() {
                Some('*') => {
                    self.advance();
                    JvmTypeArgument::Any
                }
                Some('+') => {
                    self.advance();
                    JvmTypeArgument::Extends(self.reference_type()?)
                }
                Some('-') => {
                    self.advance();
                    JvmTypeArgument::Super(self.reference_type()?)
                }
                _ => JvmTypeArgument::Exact(self.reference_type()?),
            };
            arguments.push(argument);
        }
        self.expect('>')?;
        if arguments.is_empty() {
            return Err(self.error("empty type argument list"));
        }
        Ok(arguments)
    }

    fn type_parameters(&mut self) -> ModelResult<Vec<JvmTypeParameter>> {
        let mut parameters = Vec::new();
        if self.peek() != Some('<') {
            return Ok(parameters);
        }
        self.advance();
        while self.peek() != Some('>') {
            let name = self.identifier()?;
            self.expect(':')?;
            let class_bound = match self.peek() {
                Some(':') | Some('>') => None,
                _ => Some(self.reference_type()?),
            };
            let mut interface_bounds = Vec::new();
            while self.peek() == Some(':') {
                self.advance();
                interface_bounds.push(self.reference_type()?);
            }
            parameters.push(JvmTypeParameter {
                name,
                class_bound,
                interface_bounds,
            });
        }
        self.expect('>')?;
        if parameters.is_empty() {
            return Err(self.error("empty type parameter list"));
        }
        Ok(parameters)
    }
}

impl fmt::Display for JvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JvmType::Base(base) => write!(f, "{}", base.descriptor()),
            JvmType::Array(component) => write!(f, "[{component}"),
            JvmType::TypeVariable(name) => write!(f, "T{name};"),
            JvmType::Class(class) => {
                let (outer, inner) = match class.name.rsplit_once('$') {
                    Some((outer, inner)) => (outer, Some(inner)),
                    None => (class.name.as_str(), None),
                };
                write!(f, "L{}", outer.replace('.', "/"))?;
                if let Some(inner) = inner {
                    write!(f, ".{inner}")?;
                }
                if !class.type_arguments.is_empty() {
                    f.write_str("<")?;
                    for argument in &class.type_arguments {
                        match argument {
                            JvmTypeArgument::Any => f.write_str("*")?,
                            JvmTypeArgument::Exact(ty) => write!(f, "{ty}")?,
                            JvmTypeArgument::Extends(ty) => write!(f, "+{ty}")?,
                            JvmTypeArgument::Super(ty) => write!(f, "-{ty}")?,
                        }
                    }
                    f.write_str(">")?;
                }
                f.write_str(";")
            }
        }
    }
}

#[cfg(test)]
#[path = "jvm/jvm_tests.rs"]
mod jvm_tests;
