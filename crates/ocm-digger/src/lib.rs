//! Digger - path based value extraction for output formatting.
//!
//! The digger answers "what is the value of column `api.url` for this
//! object?" without the caller writing a projection for every column. It
//! works on two kinds of input:
//!
//! - dynamic documents ([`Value::Map`]), typically decoded API responses;
//! - typed objects implementing [`Inspect`], which declare their accessors
//!   and fields once.
//!
//! # Quick Start
//!
//! ```rust
//! use ocm_digger::{Digger, Inspect, Member, Value};
//!
//! struct Cluster {
//!     id: String,
//!     name: String,
//! }
//!
//! impl Inspect for Cluster {
//!     fn members(&self) -> &'static [Member] {
//!         const MEMBERS: &[Member] = &[Member::method("ID"), Member::field("name")];
//!         MEMBERS
//!     }
//!
//!     fn member(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "ID" => Some(Value::from(&self.id)),
//!             "name" => Some(Value::from(&self.name)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let digger = Digger::new();
//! let cluster = Value::object(Cluster { id: "123".into(), name: "mycluster".into() });
//!
//! assert_eq!(digger.dig(&cluster, "id"), Value::from("123"));
//! assert_eq!(digger.dig(&cluster, "name"), Value::from("mycluster"));
//! assert!(digger.dig(&cluster, "state").is_none());
//! ```
//!
//! # Name Matching
//!
//! Path segments match member names case-insensitively, with `_` in the
//! segment bridging to camel case word boundaries in the name:
//!
//! | Segment | Matches |
//! |---------|---------|
//! | `id` | `ID`, `Id`, `id` |
//! | `external_id` | `ExternalID`, `externalId`, `external_id` |
//! | `b` | `B`, `GetB`, `get_b` (accessors only) |
//! | `getaway` | `Getaway` (the `Get` is part of the word) |
//!
//! # Precedence
//!
//! For typed objects, accessors with a presence flag win over plain
//! accessors, and accessors win over fields. A presence accessor reporting
//! "not present" makes the whole lookup [`Value::None`].

mod digger;
mod inspect;
mod names;
mod value;

pub use digger::Digger;
pub use inspect::{Inspect, Member, MemberKind};
pub use names::{name_matches, strip_get_prefix};
pub use value::{Number, Value};
