//! Custom scalars become string newtypes.

use chainql_schema::Type;

use crate::naming;
use crate::writer::CodeWriter;

pub(crate) fn emit(w: &mut CodeWriter, ty: &Type) {
    let name = naming::type_name(&ty.name);

    w.doc(ty.description.as_deref());
    w.line("#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]");
    w.line("#[serde(transparent)]");
    w.line(format!("pub struct {name}(pub String);"));
    w.blank();

    w.block(format!("impl {name} {{"), |w| {
        w.block("pub fn new(value: impl Into<String>) -> Self {", |w| {
            w.line("Self(value.into())");
        });
        w.blank();
        w.block("pub fn as_str(&self) -> &str {", |w| w.line("&self.0"));
        w.blank();
        w.block("pub fn into_inner(self) -> String {", |w| w.line("self.0"));
    });
    w.blank();

    w.block(format!("impl From<String> for {name} {{"), |w| {
        w.block("fn from(value: String) -> Self {", |w| w.line("Self(value)"));
    });
    w.blank();

    w.block(format!("impl From<&str> for {name} {{"), |w| {
        w.block("fn from(value: &str) -> Self {", |w| {
            w.line("Self(value.to_string())");
        });
    });
    w.blank();

    w.block(format!("impl AsRef<str> for {name} {{"), |w| {
        w.block("fn as_ref(&self) -> &str {", |w| w.line("&self.0"));
    });
    w.blank();

    w.block(format!("impl std::fmt::Display for {name} {{"), |w| {
        w.block(
            "fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {",
            |w| w.line("f.write_str(&self.0)"),
        );
    });
    w.blank();

    w.block(format!("impl sdk::IntoArgValue for {name} {{"), |w| {
        w.block("fn into_arg_value(self) -> sdk::ArgValue {", |w| {
            w.line("sdk::ArgValue::String(self.0)");
        });
    });
}
