//! Enums keep their values in source order and encode as bare symbols.

use chainql_schema::Type;

use crate::naming;
use crate::writer::CodeWriter;

pub(crate) fn emit(w: &mut CodeWriter, ty: &Type) {
    let name = naming::type_name(&ty.name);
    let variants: Vec<(String, &str)> = ty
        .enum_values
        .iter()
        .map(|v| (naming::variant_name(&v.name), v.name.as_str()))
        .collect();

    w.doc(ty.description.as_deref());
    w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]");
    w.block(format!("pub enum {name} {{"), |w| {
        for value in &ty.enum_values {
            w.doc(value.description.as_deref());
            w.deprecated(value.is_deprecated, value.deprecation_reason.as_deref());
            w.line(format!("#[serde(rename = {:?})]", value.name));
            w.line(format!("{},", naming::variant_name(&value.name)));
        }
    });
    w.blank();

    w.block(format!("impl {name} {{"), |w| {
        w.line("/// Wire name of the value.");
        w.block("pub fn as_str(&self) -> &'static str {", |w| {
            if variants.is_empty() {
                w.line("match *self {}");
                return;
            }
            w.block("match self {", |w| {
                for (variant, wire) in &variants {
                    w.line(format!("Self::{variant} => {wire:?},"));
                }
            });
        });
    });
    w.blank();

    w.block(format!("impl std::fmt::Display for {name} {{"), |w| {
        w.block(
            "fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {",
            |w| w.line("f.write_str(self.as_str())"),
        );
    });
    w.blank();

    w.block(format!("impl sdk::IntoArgValue for {name} {{"), |w| {
        w.block("fn into_arg_value(self) -> sdk::ArgValue {", |w| {
            w.line("sdk::ArgValue::Enum(self.as_str().to_string())");
        });
    });
}
