//! The schema type graph.

use serde::{Deserialize, Serialize};

/// Built-in primitive scalars. These never get a generated binding.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Returns true for the built-in primitive scalars.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Returns true for types that belong to the introspection system itself.
pub fn is_introspection_type(name: &str) -> bool {
    name.starts_with("__")
}

/// The kind of a type, as reported by introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Parses the wire spelling (`INPUT_OBJECT`, ...).
    pub fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "SCALAR" => Self::Scalar,
            "OBJECT" => Self::Object,
            "INTERFACE" => Self::Interface,
            "UNION" => Self::Union,
            "ENUM" => Self::Enum,
            "INPUT_OBJECT" => Self::InputObject,
            "LIST" => Self::List,
            "NON_NULL" => Self::NonNull,
            _ => return None,
        })
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }

    /// Wrapper kinds carry an inner reference instead of a name.
    pub const fn is_wrapper(&self) -> bool {
        matches!(self, Self::List | Self::NonNull)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a type, possibly wrapped in non-null and list layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A terminal named type.
    Named { kind: TypeKind, name: String },
    /// `T!`
    NonNull(Box<TypeRef>),
    /// `[T]`
    List(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a named leaf.
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self::Named {
            kind,
            name: name.into(),
        }
    }

    /// Wraps `inner` in a non-null layer.
    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Wraps `inner` in a list layer.
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// The kind of the outermost layer.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Named { kind, .. } => *kind,
            Self::NonNull(_) => TypeKind::NonNull,
            Self::List(_) => TypeKind::List,
        }
    }

    /// Strips a single leading non-null layer.
    ///
    /// Every classification predicate goes through this first.
    pub fn unwrap_non_null(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    /// True unless the outermost layer is non-null.
    pub fn is_optional(&self) -> bool {
        !matches!(self, Self::NonNull(_))
    }

    /// Scalars and enums are both read as plain values.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.unwrap_non_null().kind(),
            TypeKind::Scalar | TypeKind::Enum
        )
    }

    pub fn is_enum(&self) -> bool {
        self.unwrap_non_null().kind() == TypeKind::Enum
    }

    pub fn is_object(&self) -> bool {
        self.unwrap_non_null().kind() == TypeKind::Object
    }

    pub fn is_input_object(&self) -> bool {
        self.unwrap_non_null().kind() == TypeKind::InputObject
    }

    pub fn is_list(&self) -> bool {
        self.unwrap_non_null().kind() == TypeKind::List
    }

    /// A list whose (non-null unwrapped) element is an object.
    pub fn is_list_of_object(&self) -> bool {
        match self.unwrap_non_null() {
            Self::List(inner) => inner.is_object(),
            _ => false,
        }
    }

    /// The element reference of a list, if this is one.
    pub fn list_element(&self) -> Option<&TypeRef> {
        match self.unwrap_non_null() {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// The innermost named leaf.
    pub fn named_leaf(&self) -> (TypeKind, &str) {
        match self {
            Self::Named { kind, name } => (*kind, name),
            Self::NonNull(inner) | Self::List(inner) => inner.named_leaf(),
        }
    }

    /// Name of the innermost named type.
    pub fn name(&self) -> &str {
        self.named_leaf().1
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named { name, .. } => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// An argument or an input-object field.
#[derive(Debug, Clone)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub type_ref: TypeRef,
    /// Raw GraphQL literal of the default, if any.
    pub default_value: Option<String>,
}

impl InputValue {
    /// Optional when nullable or defaulted.
    pub fn is_optional(&self) -> bool {
        self.type_ref.is_optional() || self.default_value.is_some()
    }
}

/// A member of an enum type.
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// A selectable field of an object type.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub type_ref: TypeRef,
    pub args: Vec<InputValue>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
    /// Name of the declaring type.
    pub parent: String,
}

impl Field {
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn required_args(&self) -> impl Iterator<Item = &InputValue> {
        self.args.iter().filter(|a| !a.is_optional())
    }

    pub fn optional_args(&self) -> impl Iterator<Item = &InputValue> {
        self.args.iter().filter(|a| a.is_optional())
    }

    pub fn has_optional_args(&self) -> bool {
        self.args.iter().any(InputValue::is_optional)
    }

    /// The field's return scalar mirrors its parent's identity type
    /// (`<Parent>ID`) but the field itself is not `id`.
    ///
    /// Such fields are executed for their side effect and the binding
    /// keeps chaining on the receiver.
    pub fn returns_parent_id(&self) -> bool {
        self.name != "id"
            && self.type_ref.unwrap_non_null().kind() == TypeKind::Scalar
            && self.type_ref.name() == id_scalar_name(&self.parent)
    }
}

/// Name of the identity scalar for an object type.
pub fn id_scalar_name(type_name: &str) -> String {
    format!("{type_name}ID")
}

/// One named type of the schema.
#[derive(Debug, Clone)]
pub struct Type {
    pub kind: TypeKind,
    pub name: String,
    pub description: Option<String>,
    /// Sorted by name.
    pub fields: Vec<Field>,
    /// Sorted by name.
    pub input_fields: Vec<InputValue>,
    /// Source order.
    pub enum_values: Vec<EnumValue>,
}

impl Type {
    /// The `id` field, when it returns this type's own `<Name>ID` scalar.
    pub fn id_field(&self) -> Option<&Field> {
        if self.kind != TypeKind::Object {
            return None;
        }
        let expected = id_scalar_name(&self.name);
        self.fields.iter().find(|f| {
            f.name == "id"
                && f.type_ref.unwrap_non_null().kind() == TypeKind::Scalar
                && f.type_ref.name() == expected
        })
    }

    /// Whether this object can round-trip through an opaque id.
    pub fn provides_id(&self) -> bool {
        self.id_field().is_some()
    }

    /// Root field used to reload an instance from its id.
    pub fn loader_field_name(&self) -> String {
        format!("load{}FromID", self.name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Scalar, name)
    }

    fn object(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Object, name)
    }

    fn field(name: &str, parent: &str, type_ref: TypeRef) -> Field {
        Field {
            name: name.to_string(),
            description: None,
            type_ref,
            args: Vec::new(),
            is_deprecated: false,
            deprecation_reason: None,
            parent: parent.to_string(),
        }
    }

    #[test]
    fn test_optional_predicate() {
        assert!(scalar("String").is_optional());
        assert!(!TypeRef::non_null(scalar("String")).is_optional());
        assert!(TypeRef::list(TypeRef::non_null(scalar("String"))).is_optional());
    }

    #[test]
    fn test_predicates_unwrap_non_null() {
        let ty = TypeRef::non_null(object("Container"));
        assert!(ty.is_object());
        assert!(!ty.is_scalar());
        assert!(!ty.is_list());

        let ty = TypeRef::non_null(TypeRef::named(TypeKind::Enum, "NetworkProtocol"));
        assert!(ty.is_scalar());
        assert!(ty.is_enum());
    }

    #[test]
    fn test_list_of_object() {
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(object("Port"))));
        assert!(ty.is_list());
        assert!(ty.is_list_of_object());
        assert_eq!(ty.name(), "Port");

        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(scalar("String"))));
        assert!(ty.is_list());
        assert!(!ty.is_list_of_object());
        assert!(ty.list_element().unwrap().is_scalar());
    }

    #[test]
    fn test_display() {
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(scalar("String"))));
        assert_eq!(ty.to_string(), "[String!]!");
    }

    #[test]
    fn test_provides_id() {
        let ty = Type {
            kind: TypeKind::Object,
            name: "Container".to_string(),
            description: None,
            fields: vec![
                field(
                    "id",
                    "Container",
                    TypeRef::non_null(scalar("ContainerID")),
                ),
                field("stdout", "Container", TypeRef::non_null(scalar("String"))),
            ],
            input_fields: Vec::new(),
            enum_values: Vec::new(),
        };
        assert!(ty.provides_id());
        assert_eq!(ty.loader_field_name(), "loadContainerFromID");

        let ty = Type {
            name: "Port".to_string(),
            fields: vec![field("id", "Port", TypeRef::non_null(scalar("ID")))],
            ..ty
        };
        assert!(!ty.provides_id());
    }

    #[test]
    fn test_returns_parent_id() {
        let sync = field("sync", "Container", TypeRef::non_null(scalar("ContainerID")));
        assert!(sync.returns_parent_id());

        let id = field("id", "Container", TypeRef::non_null(scalar("ContainerID")));
        assert!(!id.returns_parent_id());

        let other = field("file", "Container", TypeRef::non_null(scalar("FileID")));
        assert!(!other.returns_parent_id());
    }

    #[test]
    fn test_required_and_optional_args() {
        let mut f = field("withExec", "Container", object("Container"));
        f.args = vec![
            InputValue {
                name: "args".to_string(),
                description: None,
                type_ref: TypeRef::non_null(TypeRef::list(TypeRef::non_null(scalar("String")))),
                default_value: None,
            },
            InputValue {
                name: "useEntrypoint".to_string(),
                description: None,
                type_ref: TypeRef::non_null(scalar("Boolean")),
                default_value: Some("false".to_string()),
            },
        ];
        assert_eq!(f.required_args().count(), 1);
        assert_eq!(f.optional_args().count(), 1);
        assert!(f.has_optional_args());
    }
}
