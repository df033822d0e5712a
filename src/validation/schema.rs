//! Static request-body shape descriptors

/// Primitive kinds a body field can decode into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    /// 24-character hex record identifier
    Id,
}

/// Declarative per-field validation rules
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Value must differ from the kind's zero value
    Required,
    /// String length (in chars) must be at least this
    MinLen(usize),
    /// Numeric value must fall inside the declared bounds
    Range { min: Option<f64>, max: Option<f64> },
    /// Value must equal one of the members, case-sensitively
    OneOf(&'static [&'static str]),
    /// Value must look like an email address
    Email,
}

/// One field of a request shape: internal name, optional wire rename,
/// primitive kind and its rule set
#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub rename: Option<&'static str>,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind, rules: &'static [Rule]) -> Self {
        Self { name, rename: None, kind, rules }
    }

    pub const fn renamed(
        name: &'static str,
        rename: &'static str,
        kind: FieldKind,
        rules: &'static [Rule],
    ) -> Self {
        Self { name, rename: Some(rename), kind, rules }
    }

    /// External (wire) name: the rename when configured, else the internal name
    pub const fn wire_name(&self) -> &'static str {
        match self.rename {
            Some(name) => name,
            None => self.name,
        }
    }
}

/// A complete request-body shape. Declared as `static` consts, so lookups
/// need no cache and are safe to share across requests.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl Schema {
    pub fn field(&self, internal: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == internal)
    }

    /// Wire name for an internal field name. Unknown fields fall back to
    /// the internal name unchanged.
    pub fn wire_name<'a>(&self, internal: &'a str) -> &'a str {
        match self.field(internal) {
            Some(field) => field.wire_name(),
            None => internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHAPE: Schema = Schema {
        name: "test",
        fields: &[
            FieldDescriptor::renamed("full_name", "name", FieldKind::Str, &[Rule::Required]),
            FieldDescriptor::new("email", FieldKind::Str, &[Rule::Required, Rule::Email]),
        ],
    };

    #[test]
    fn wire_name_prefers_rename() {
        assert_eq!(SHAPE.wire_name("full_name"), "name");
    }

    #[test]
    fn wire_name_falls_back_to_internal_name() {
        assert_eq!(SHAPE.wire_name("email"), "email");
        // unknown fields come back unchanged
        assert_eq!(SHAPE.wire_name("unknown"), "unknown");
    }

    #[test]
    fn field_lookup_is_by_internal_name() {
        assert!(SHAPE.field("full_name").is_some());
        assert!(SHAPE.field("name").is_none());
    }
}
