//! Rust identifiers for GraphQL names.

use heck::{ToSnakeCase, ToUpperCamelCase};

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Names reserved by the generated method signatures.
const RESERVED_PARAMS: &[&str] = &["opts", "query"];

fn sanitize(mut ident: String) -> String {
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// `ContainerID` -> `ContainerId`.
pub(crate) fn type_name(name: &str) -> String {
    sanitize(name.to_upper_camel_case())
}

/// `SUCCESS` -> `Success`.
pub(crate) fn variant_name(value: &str) -> String {
    sanitize(value.to_upper_camel_case())
}

/// `withExec` -> `with_exec`, `type` -> `type_`.
pub(crate) fn method_name(name: &str) -> String {
    sanitize(name.to_snake_case())
}

/// Like [`method_name`], also avoiding names the generated body uses.
pub(crate) fn param_name(name: &str) -> String {
    let ident = method_name(name);
    if RESERVED_PARAMS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Snake-case module name for a type's file.
pub(crate) fn module_name(type_name: &str) -> String {
    sanitize(type_name.to_snake_case())
}

/// `Container` + `withExec` -> `ContainerWithExecOpts`.
pub(crate) fn opts_name(owner: &str, field: &str) -> String {
    format!("{owner}{}Opts", field.to_upper_camel_case())
}
