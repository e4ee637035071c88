//! Well-known host types
//!
//! This table is the single place deciding how standard library types map onto
//! the primitive schema kinds of the intermediate document. A class that is
//! neither listed here nor available on the class path is opaque.

/// Format of a numeric schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Int32,
    Int64,
    Float,
    Double,
    /// Arbitrary precision, no format
    Decimal,
}

impl NumberFormat {
    /// Whether the schema type is `integer` rather than `number`
    pub fn is_integral(self) -> bool {
        matches!(self, NumberFormat::Int32 | NumberFormat::Int64)
    }

    pub fn format(self) -> Option<&'static str> {
        match self {
            NumberFormat::Int32 => Some("int32"),
            NumberFormat::Int64 => Some("int64"),
            NumberFormat::Float => Some("float"),
            NumberFormat::Double => Some("double"),
            NumberFormat::Decimal => None,
        }
    }
}

/// Schema kind of a well-known type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownKind {
    String,
    Number(NumberFormat),
    Boolean,
    Date,
    DateTime,
    Iterable,
    Map,
    Optional,
    Void,
    Object,
}

/// The universal root class
pub const OBJECT_CLASS: &str = "java.lang.Object";

const STRING_CLASSES: &[&str] = &["java.lang.String", "java.lang.Character", "java.lang.CharSequence"];

const NUMBER_CLASSES: &[(&str, NumberFormat)] = &[
    ("java.lang.Byte", NumberFormat::Int32),
    ("java.lang.Short", NumberFormat::Int32),
    ("java.lang.Integer", NumberFormat::Int32),
    ("java.lang.Long", NumberFormat::Int64),
    ("java.lang.Float", NumberFormat::Float),
    ("java.lang.Double", NumberFormat::Double),
    ("java.math.BigInteger", NumberFormat::Decimal),
    ("java.math.BigDecimal", NumberFormat::Decimal),
    ("java.lang.Number", NumberFormat::Decimal),
];

const DATE_CLASSES: &[&str] = &["java.util.Date", "java.time.LocalDate"];

const DATE_TIME_CLASSES: &[&str] = &[
    "java.time.LocalDateTime",
    "java.time.Instant",
    "java.time.LocalTime",
    "java.time.ZonedDateTime",
    "java.time.OffsetDateTime",
];

/// Standard types assignable to `java.lang.Iterable`
pub const ITERABLE_CLASSES: &[&str] = &[
    "java.lang.Iterable",
    "java.util.Collection",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.SortedSet",
    "java.util.NavigableSet",
    "java.util.TreeSet",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.ArrayDeque",
];

/// Standard types assignable to `java.util.Map`
pub const MAP_CLASSES: &[&str] = &[
    "java.util.Map",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.SortedMap",
    "java.util.NavigableMap",
    "java.util.TreeMap",
    "java.util.EnumMap",
    "java.util.concurrent.ConcurrentMap",
    "java.util.concurrent.ConcurrentHashMap",
];

const OPTIONAL_CLASSES: &[&str] = &["java.util.Optional"];

/// Classify a class by name
pub fn classify(name: &str) -> Option<KnownKind> {
    if STRING_CLASSES.contains(&name) {
        return Some(KnownKind::String);
    }
    if let Some((_, format)) = NUMBER_CLASSES.iter().find(|(n, _)| *n == name) {
        return Some(KnownKind::Number(*format));
    }
    if name == "java.lang.Boolean" {
        return Some(KnownKind::Boolean);
    }
    if DATE_CLASSES.contains(&name) {
        return Some(KnownKind::Date);
    }
    if DATE_TIME_CLASSES.contains(&name) {
        return Some(KnownKind::DateTime);
    }
    if ITERABLE_CLASSES.contains(&name) {
        return Some(KnownKind::Iterable);
    }
    if MAP_CLASSES.contains(&name) {
        return Some(KnownKind::Map);
    }
    if OPTIONAL_CLASSES.contains(&name) {
        return Some(KnownKind::Optional);
    }
    match name {
        "java.lang.Void" => Some(KnownKind::Void),
        OBJECT_CLASS => Some(KnownKind::Object),
        _ => None,
    }
}

/// Classify a class by the standard supertypes it is assignable to.
///
/// Used for user classes that extend or implement a collection type.
pub fn classify_by_supertypes<'a>(supertypes: impl IntoIterator<Item = &'a str>) -> Option<KnownKind> {
    let mut kind = None;
    for name in supertypes {
        match classify(name) {
            Some(KnownKind::Map) => return Some(KnownKind::Map),
            Some(KnownKind::Iterable) => kind = Some(KnownKind::Iterable),
            _ => {}
        }
    }
    kind
}

/// Whether a class belongs to the platform rather than user code
pub fn is_platform_class(name: &str) -> bool {
    name.starts_with("java.") || name.starts_with("javax.") || name.starts_with("jdk.")
}
