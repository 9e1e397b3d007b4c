//! Semantic records built over the declaration tree.
//!
//! Each record keeps the [`NodeId`] it was gathered from so later passes and
//! the emitter can walk back into the tree for spans and raw children.
//! Cross-registry references use [`TypeRef`] handles rather than borrows, so
//! registries of different files can point at each other freely.

use til_ir::{FileId, NodeId, Span};

/// The out-type marker that makes a map produce `TypeInfo` pointers instead
/// of values of a declared type.
pub const TYPE_INFO_MARKER: &str = "$Type";

/// Handle to a type registered in some file's registry.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TypeRef {
    pub file: FileId,
    pub index: u32,
}

/// Kind-specific payload of a registered type.
///
/// The `Option` fields start out `None` and are filled by the equip passes;
/// a field still `None` after its pass ran means the pass found the unit
/// invalid and emission must skip it.
#[derive(Clone, Debug)]
pub enum TypeKind {
    Basic {
        /// Size in bytes.
        size: Option<u64>,
        /// C spelling when it differs from the declared name, e.g.
        /// `unsigned int` for `u32`.
        alias: Option<String>,
    },
    Struct {
        members: Option<Vec<Member>>,
    },
    Enum {
        underlying: Option<TypeRef>,
        enumerants: Option<Vec<Enumerant>>,
    },
}

impl TypeKind {
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Basic { .. } => "basic",
            TypeKind::Struct { .. } => "struct",
            TypeKind::Enum { .. } => "enum",
        }
    }
}

/// One registered type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub name: String,
    pub node: NodeId,
    pub span: Span,
    pub kind: TypeKind,
}

impl TypeInfo {
    /// Whether every equip pass succeeded for this type.
    ///
    /// Invalid types stay in the registry so later references still resolve,
    /// but the emitter skips them entirely.
    pub fn is_valid(&self) -> bool {
        match &self.kind {
            TypeKind::Basic { size, .. } => size.is_some(),
            TypeKind::Struct { members } => members.is_some(),
            TypeKind::Enum { enumerants, .. } => enumerants.is_some(),
        }
    }
}

/// One struct member.
#[derive(Clone, Debug)]
pub struct Member {
    pub name: String,
    pub span: Span,
    pub ty: TypeRef,
    pub array: Option<ArrayLen>,
}

/// How a member's array length is determined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayLen {
    /// Length held at runtime by an earlier member (by index in the member
    /// list); emitted as a pointer.
    Count(usize),
    /// Fixed dimensions known at declaration time; emitted as `T name[2][3]`.
    Fixed(Vec<u64>),
}

/// One enum value.
#[derive(Clone, Debug)]
pub struct Enumerant {
    pub name: String,
    pub span: Span,
    pub value: i64,
}

/// What a map produces.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MapOut {
    /// Values of a declared type.
    Type(TypeRef),
    /// `TypeInfo *` pointers; case expressions name types and are emitted
    /// as `&<name>_type_info`.
    TypeInfoPtr,
}

/// A map's resolved In and Out types.
#[derive(Copy, Clone, Debug)]
pub struct TypedMap {
    pub input: TypeRef,
    pub output: MapOut,
}

/// One explicit map case, `in -> out`.
#[derive(Clone, Debug)]
pub struct MapCase {
    /// Index into the In enum's enumerant list.
    pub enumerant: usize,
    /// Span of the case's `in` side, for duplicate reports.
    pub span: Span,
    /// Raw out expression text.
    pub out: String,
}

/// One registered map.
#[derive(Clone, Debug)]
pub struct MapInfo {
    pub name: String,
    pub node: NodeId,
    pub span: Span,
    /// `None` until the map typing pass succeeds.
    pub typed: Option<TypedMap>,
    pub is_complete: bool,
    /// Expression for the switch's `default:` branch.
    pub default_expr: Option<String>,
    /// Expression every enumerant without an explicit case maps to.
    pub auto_expr: Option<String>,
    /// `None` if the case pass found the list invalid.
    pub cases: Option<Vec<MapCase>>,
}

impl MapInfo {
    pub fn new(name: String, node: NodeId, span: Span) -> Self {
        MapInfo {
            name,
            node,
            span,
            typed: None,
            is_complete: false,
            default_expr: None,
            auto_expr: None,
            cases: None,
        }
    }
}
