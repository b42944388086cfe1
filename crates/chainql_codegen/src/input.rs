//! Input objects become plain structs encoded as object literals.

use chainql_schema::{InputValue, Type};

use crate::error::CodegenResult;
use crate::mapping::TypeMapper;
use crate::naming;
use crate::writer::CodeWriter;

struct InputField<'a> {
    value: &'a InputValue,
    ident: String,
    /// Type of the struct field, `Option<_>` when optional.
    field_type: String,
    /// Type accepted by the constructor and setter.
    param_type: String,
    optional: bool,
}

impl InputField<'_> {
    fn is_string(&self) -> bool {
        self.param_type == "impl Into<String>"
    }

    fn assigned(&self) -> String {
        if self.is_string() {
            format!("{}.into()", self.ident)
        } else {
            self.ident.clone()
        }
    }
}

pub(crate) fn emit(w: &mut CodeWriter, mapper: &TypeMapper<'_>, ty: &Type) -> CodegenResult<()> {
    let name = naming::type_name(&ty.name);

    // input_fields are sorted, which fixes the literal's key order
    let fields = ty
        .input_fields
        .iter()
        .map(|value| {
            let context = format!("{}.{}", ty.name, value.name);
            let bare = mapper.bare_type(&value.type_ref, &context)?;
            let optional = value.type_ref.is_optional();
            Ok(InputField {
                value,
                ident: naming::param_name(&value.name),
                field_type: if optional {
                    format!("Option<{bare}>")
                } else {
                    bare.clone()
                },
                param_type: if bare == "String" {
                    "impl Into<String>".to_string()
                } else {
                    bare
                },
                optional,
            })
        })
        .collect::<CodegenResult<Vec<_>>>()?;

    let all_optional = fields.iter().all(|f| f.optional);

    w.doc(ty.description.as_deref());
    if all_optional {
        w.line("#[derive(Debug, Clone, PartialEq, Default)]");
    } else {
        w.line("#[derive(Debug, Clone, PartialEq)]");
    }
    w.block(format!("pub struct {name} {{"), |w| {
        for field in &fields {
            w.doc(field.value.description.as_deref());
            w.line(format!("pub {}: {},", field.ident, field.field_type));
        }
    });
    w.blank();

    let required: Vec<&InputField> = fields.iter().filter(|f| !f.optional).collect();

    w.block(format!("impl {name} {{"), |w| {
        let params = required
            .iter()
            .map(|f| format!("{}: {}", f.ident, f.param_type))
            .collect::<Vec<_>>()
            .join(", ");
        w.block(format!("pub fn new({params}) -> Self {{"), |w| {
            if fields.is_empty() {
                w.line("Self {}");
                return;
            }
            w.block("Self {", |w| {
                for field in &fields {
                    if field.optional {
                        w.line(format!("{}: None,", field.ident));
                    } else if field.is_string() {
                        w.line(format!("{}: {},", field.ident, field.assigned()));
                    } else {
                        w.line(format!("{},", field.ident));
                    }
                }
            });
        });

        for field in &fields {
            w.blank();
            let setter = format!("with_{}", field.ident.trim_end_matches('_'));
            w.block(
                format!(
                    "pub fn {setter}(mut self, {}: {}) -> Self {{",
                    field.ident, field.param_type
                ),
                |w| {
                    if field.optional {
                        w.line(format!("self.{} = Some({});", field.ident, field.assigned()));
                    } else {
                        w.line(format!("self.{} = {};", field.ident, field.assigned()));
                    }
                    w.line("self");
                },
            );
        }

        w.blank();
        w.line("/// Encodes this value as an input-object literal. Unset fields are omitted.");
        w.block("pub fn to_arguments(&self) -> sdk::Arguments {", |w| {
            w.line("sdk::Arguments::builder()");
            w.indented(|w| {
                for field in &fields {
                    let add = if field.optional { "add_opt" } else { "add" };
                    w.line(format!(
                        ".{add}({:?}, self.{}.clone())",
                        field.value.name, field.ident
                    ));
                }
                w.line(".build()");
            });
        });
    });
    w.blank();

    w.block(format!("impl sdk::IntoArgValue for {name} {{"), |w| {
        w.block("fn into_arg_value(self) -> sdk::ArgValue {", |w| {
            w.line("sdk::ArgValue::Object(self.to_arguments())");
        });
    });

    Ok(())
}
