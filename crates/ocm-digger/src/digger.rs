//! Path based extraction of values from object graphs.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use crate::inspect::{Inspect, Member, MemberKind};
use crate::names::{method_matches, name_matches};
use crate::value::Value;

type CacheKey = (TypeId, String);

/// Extracts values from objects using dotted paths like `api.url`.
///
/// Each segment of the path is resolved against the current value:
///
/// - for typed objects, accessor members are preferred over fields, and
///   accessors with a presence flag over plain ones;
/// - for maps, the entry with the same key wins, otherwise the first key
///   matching the segment by [`name_matches`];
/// - any other value, or a failed resolution, ends the lookup with
///   [`Value::None`].
///
/// Resolutions for typed objects are computed once per type and segment and
/// then reused. The two caches (accessors and fields) are guarded by their own
/// locks so a digger can be shared between threads.
///
/// # Example
///
/// ```
/// use ocm_digger::{Digger, Value};
/// use serde_json::json;
///
/// let digger = Digger::new();
/// let cluster = Value::from(json!({"api": {"url": "https://api.example.com:6443"}}));
///
/// assert_eq!(digger.dig(&cluster, "api.url"), Value::from("https://api.example.com:6443"));
/// assert!(digger.dig(&cluster, "api.port").is_none());
/// assert_eq!(digger.dig(&cluster, ""), cluster);
/// ```
#[derive(Debug, Default)]
pub struct Digger {
    methods: Mutex<HashMap<CacheKey, Option<Member>>>,
    fields: Mutex<HashMap<CacheKey, Option<Member>>>,
}

impl Digger {
    /// Creates a digger with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the value at `path` from `object`.
    ///
    /// An empty path returns the object itself. Lookups never fail: anything
    /// that can't be resolved yields [`Value::None`].
    pub fn dig(&self, object: &Value, path: &str) -> Value {
        let path = path.trim();
        if path.is_empty() {
            return object.clone();
        }

        let mut current = object.clone();
        for segment in path.split('.').map(str::trim) {
            current = self.step(&current, segment);
            if current.is_none() {
                break;
            }
        }
        current
    }

    /// Extracts the value at `path` from a borrowed typed object.
    ///
    /// Unlike [`Digger::dig`], an empty path yields [`Value::None`]: the
    /// borrowed object can't be handed back as an owned value. Wrap owned
    /// objects with [`Value::object`] and use [`Digger::dig`] when the empty
    /// path has to return the object itself.
    ///
    /// ```
    /// use ocm_digger::{Digger, Inspect, Member, Value};
    ///
    /// struct Node(&'static str);
    ///
    /// impl Inspect for Node {
    ///     fn members(&self) -> &'static [Member] {
    ///         const MEMBERS: &[Member] = &[Member::method("ID")];
    ///         MEMBERS
    ///     }
    ///
    ///     fn member(&self, name: &str) -> Option<Value> {
    ///         (name == "ID").then(|| Value::from(self.0))
    ///     }
    /// }
    ///
    /// let digger = Digger::new();
    /// assert_eq!(digger.dig_inspect(&Node("n1"), "id"), Value::from("n1"));
    /// assert!(digger.dig_inspect(&Node("n1"), "").is_none());
    ///
    /// let owned = Value::object(Node("n1"));
    /// assert_eq!(digger.dig(&owned, ""), owned);
    /// ```
    pub fn dig_inspect(&self, object: &dyn Inspect, path: &str) -> Value {
        let path = path.trim();
        if path.is_empty() {
            return Value::None;
        }

        let mut segments = path.split('.').map(str::trim);
        let first = match segments.next() {
            Some(segment) => self.step_object(object, segment),
            None => return Value::None,
        };
        segments.fold(first, |current, segment| {
            if current.is_none() {
                current
            } else {
                self.step(&current, segment)
            }
        })
    }

    fn step(&self, current: &Value, segment: &str) -> Value {
        match current {
            Value::Object(object) => self.step_object(object.as_ref(), segment),
            Value::Map(entries) => entries
                .get(segment)
                .or_else(|| {
                    entries
                        .iter()
                        .find(|(key, _)| name_matches(key, segment))
                        .map(|(_, value)| value)
                })
                .cloned()
                .unwrap_or_default(),
            other => {
                trace!(segment, kind = other.kind_name(), "value has no members");
                Value::None
            }
        }
    }

    fn step_object(&self, object: &dyn Inspect, segment: &str) -> Value {
        let key = (object.type_key(), segment.to_string());

        if let Some(member) = self.resolve(&self.methods, &key, object, |members| {
            find_method(members, segment)
        }) {
            return object.member(member.name).unwrap_or_default();
        }

        if let Some(member) = self.resolve(&self.fields, &key, object, |members| {
            members
                .iter()
                .find(|m| m.kind == MemberKind::Field && name_matches(m.name, segment))
                .copied()
        }) {
            return object.member(member.name).unwrap_or_default();
        }

        Value::None
    }

    fn resolve(
        &self,
        cache: &Mutex<HashMap<CacheKey, Option<Member>>>,
        key: &CacheKey,
        object: &dyn Inspect,
        search: impl FnOnce(&'static [Member]) -> Option<Member>,
    ) -> Option<Member> {
        // Entries are inserted whole, a poisoned map is still consistent.
        let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(resolved) = cache.get(key) {
            return *resolved;
        }
        let resolved = search(object.members());
        trace!(
            type_name = object.type_name(),
            segment = %key.1,
            member = ?resolved.map(|m| m.name),
            "resolved member"
        );
        cache.insert(key.clone(), resolved);
        resolved
    }

    /// Number of cached resolutions, accessors and fields.
    pub fn cached(&self) -> (usize, usize) {
        let methods = self.methods.lock().unwrap_or_else(|e| e.into_inner()).len();
        let fields = self.fields.lock().unwrap_or_else(|e| e.into_inner()).len();
        (methods, fields)
    }
}

fn find_method(members: &[Member], segment: &str) -> Option<Member> {
    let matching = |kind: MemberKind| {
        members
            .iter()
            .find(|m| m.kind == kind && method_matches(m.name, segment))
            .copied()
    };
    matching(MemberKind::PresenceMethod).or_else(|| matching(MemberKind::Method))
}
