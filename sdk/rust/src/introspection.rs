//! The standard introspection query.
//!
//! The selection covers exactly what the schema parser reads: kinds,
//! names, descriptions, fields with arguments, input fields, enum values,
//! deprecation and up to eight levels of wrapped type references.

/// Introspection document sent by [`Connection::introspect`](crate::Connection::introspect).
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types { ...FullType }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args { ...InputValue }
    type { ...TypeRef }
    isDeprecated
    deprecationReason
  }
  inputFields { ...InputValue }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
                ofType {
                  kind
                  name
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_selects_parser_fields() {
        for needle in [
            "__schema",
            "queryType",
            "inputFields",
            "enumValues(includeDeprecated: true)",
            "defaultValue",
            "deprecationReason",
        ] {
            assert!(INTROSPECTION_QUERY.contains(needle), "missing {needle}");
        }
    }
}
