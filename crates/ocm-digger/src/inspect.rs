//! Member registry for typed objects.
//!
//! Types opt into path lookups by implementing [`Inspect`]: they declare the
//! members they expose once, and answer calls for a member by its declared
//! name. The [`Digger`](crate::Digger) does the name matching, precedence and
//! caching on top of that.

use std::any::TypeId;

use crate::value::Value;

/// How a member produces its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Accessor returning a value together with a presence flag.
    ///
    /// [`Inspect::member`] returns `None` when the value is not present; the
    /// lookup then yields [`Value::None`] even if the accessor carries a
    /// non-empty value.
    PresenceMethod,
    /// Accessor returning exactly one value.
    Method,
    /// Public data field.
    Field,
}

impl MemberKind {
    /// Returns `true` for accessor kinds.
    pub fn is_method(self) -> bool {
        matches!(self, MemberKind::PresenceMethod | MemberKind::Method)
    }
}

/// A named member declared by an [`Inspect`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Member {
    /// Declared name, matched against path segments.
    pub name: &'static str,
    /// How the member produces its value.
    pub kind: MemberKind,
}

impl Member {
    /// Declares an accessor with a presence flag.
    pub const fn presence(name: &'static str) -> Self {
        Member {
            name,
            kind: MemberKind::PresenceMethod,
        }
    }

    /// Declares a plain accessor.
    pub const fn method(name: &'static str) -> Self {
        Member {
            name,
            kind: MemberKind::Method,
        }
    }

    /// Declares a data field.
    pub const fn field(name: &'static str) -> Self {
        Member {
            name,
            kind: MemberKind::Field,
        }
    }
}

/// Trait for types whose members can be looked up by path.
///
/// # Example
///
/// ```
/// use ocm_digger::{Digger, Inspect, Member, Value};
///
/// struct Cluster {
///     id: String,
///     display_name: Option<String>,
/// }
///
/// impl Inspect for Cluster {
///     fn members(&self) -> &'static [Member] {
///         const MEMBERS: &[Member] = &[
///             Member::method("ID"),
///             Member::presence("GetDisplayName"),
///         ];
///         MEMBERS
///     }
///
///     fn member(&self, name: &str) -> Option<Value> {
///         match name {
///             "ID" => Some(Value::from(&self.id)),
///             "GetDisplayName" => self.display_name.as_ref().map(Value::from),
///             _ => None,
///         }
///     }
/// }
///
/// let digger = Digger::new();
/// let cluster = Value::object(Cluster { id: "123".into(), display_name: None });
/// assert_eq!(digger.dig(&cluster, "id"), Value::from("123"));
/// assert!(digger.dig(&cluster, "display_name").is_none());
/// ```
pub trait Inspect: Send + Sync + 'static {
    /// Members exposed by this type.
    ///
    /// The list must be the same for every instance of a type, since
    /// resolutions are cached per type.
    fn members(&self) -> &'static [Member];

    /// Produces the value of the member with the given declared name.
    ///
    /// Returns `None` when the member is absent: unknown names, presence
    /// accessors reporting "not present", or nil-like values.
    fn member(&self, name: &str) -> Option<Value>;

    /// Identity of the concrete type, used as the cache key.
    fn type_key(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Name of the concrete type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Text used when the object itself ends up in a table cell.
    fn describe(&self) -> String {
        let name = self.type_name();
        let short = name.rsplit("::").next().unwrap_or(name);
        format!("{{{}}}", short)
    }
}
