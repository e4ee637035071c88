//! JVM access flags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access and property flags of a class, field or method.
///
/// Bit values are the ones used in class files, so scanned descriptors can
/// carry the raw `access` value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(pub u16);

impl Modifiers {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const BRIDGE: u16 = 0x0040;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const ANNOTATION: u16 = 0x2000;
    pub const ENUM: u16 = 0x4000;

    pub fn new(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn with(self, flag: u16) -> Self {
        Self(self.0 | flag)
    }

    pub fn has(self, flag: u16) -> bool {
        self.0 & flag == flag
    }

    pub fn is_public(self) -> bool {
        self.has(Self::PUBLIC)
    }

    pub fn is_static(self) -> bool {
        self.has(Self::STATIC)
    }

    pub fn is_interface(self) -> bool {
        self.has(Self::INTERFACE)
    }

    pub fn is_abstract(self) -> bool {
        self.has(Self::ABSTRACT)
    }

    pub fn is_enum(self) -> bool {
        self.has(Self::ENUM)
    }

    pub fn is_annotation(self) -> bool {
        self.has(Self::ANNOTATION)
    }

    /// Compiler-generated members (synthetic or bridge)
    pub fn is_generated(self) -> bool {
        self.has(Self::SYNTHETIC) || self.has(Self::BRIDGE)
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modifiers({:#06x})", self.0)
    }
}
