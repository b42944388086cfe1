//! Object types become lazy bindings over a query builder.
//!
//! Each field turns into a method that appends one selection. What the
//! method returns depends on the field's type:
//!
//! | field type                      | method                                   |
//! |---------------------------------|------------------------------------------|
//! | the type's own `id`             | async, anchor id or `{id}` round trip    |
//! | list of objects                 | async, one binding per returned id       |
//! | object                          | sync, new binding, no request            |
//! | `<Parent>ID` (not named `id`)   | async, runs the chain, returns `self`    |
//! | scalar, enum, list of those     | async, decoded value                     |
//!
//! Null elements of an object list are skipped, and a nullable object list
//! comes back as an `Option`.
//!
//! Fields with optional arguments get a second `_opts` method taking a
//! `<Type><Field>Opts` bundle.

use chainql_schema::{Field, InputValue, Type, TypeRef};

use crate::error::{CodegenError, CodegenResult};
use crate::mapping::TypeMapper;
use crate::naming;
use crate::writer::CodeWriter;
use crate::CodegenOptions;

/// How a required argument is accepted and encoded.
struct Param<'a> {
    value: &'a InputValue,
    ident: String,
    rust_type: String,
    expr: String,
}

/// What a field method returns.
enum Shape {
    OwnId(String),
    ObjectList { element: String, optional: bool },
    Object(String),
    ParentId,
    List(String),
    Scalar(String),
}

struct FieldPlan<'a> {
    field: &'a Field,
    method: String,
    params: Vec<Param<'a>>,
    opts: Option<OptsPlan>,
    shape: Shape,
}

struct OptsPlan {
    name: String,
    fields: Vec<OptField>,
}

struct OptField {
    ident: String,
    rust_type: String,
    wire_name: String,
    description: Option<String>,
}

pub(crate) struct ObjectEmitter<'a, 'm> {
    mapper: &'m TypeMapper<'a>,
    options: &'m CodegenOptions,
    ty: &'a Type,
    rust_name: String,
    is_root: bool,
}

impl<'a, 'm> ObjectEmitter<'a, 'm> {
    pub(crate) fn new(mapper: &'m TypeMapper<'a>, options: &'m CodegenOptions, ty: &'a Type) -> Self {
        Self {
            rust_name: mapper.rust_name(&ty.name),
            is_root: mapper.schema().is_query_type(&ty.name),
            mapper,
            options,
            ty,
        }
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) -> CodegenResult<()> {
        let plans = self
            .ty
            .fields
            .iter()
            .map(|f| self.plan(f))
            .collect::<CodegenResult<Vec<_>>>()?;

        let name = &self.rust_name;
        w.doc(self.ty.description.as_deref());
        w.line("#[derive(Debug, Clone)]");
        w.block(format!("pub struct {name} {{"), |w| {
            w.line("query: sdk::QueryBuilder,");
        });
        w.blank();

        for plan in &plans {
            if let Some(opts) = &plan.opts {
                emit_opts(w, opts);
                w.blank();
            }
        }

        w.block(format!("impl {name} {{"), |w| {
            let mut first = true;
            if self.is_root {
                emit_root_constructors(w);
                first = false;
            }
            if self.is_chainable() {
                if !first {
                    w.blank();
                }
                w.line("/// Applies `f` to this value, for composing reusable steps.");
                w.block("pub fn with(self, f: impl FnOnce(Self) -> Self) -> Self {", |w| {
                    w.line("f(self)");
                });
                first = false;
            }
            for plan in &plans {
                if !first {
                    w.blank();
                }
                first = false;
                self.emit_methods(w, plan);
            }
        });
        w.blank();

        w.block(format!("impl sdk::Object for {name} {{"), |w| {
            w.line(format!(
                "const TYPE_NAME: &'static str = {:?};",
                self.ty.name
            ));
            w.blank();
            w.block("fn from_query(query: sdk::QueryBuilder) -> Self {", |w| {
                w.line("Self { query }");
            });
            w.blank();
            w.block("fn query(&self) -> &sdk::QueryBuilder {", |w| {
                w.line("&self.query");
            });
        });

        if let Some(id_field) = self.ty.id_field() {
            w.blank();
            let id_type = self.mapper.bare_type(&id_field.type_ref, &self.context(id_field))?;
            w.block(format!("impl sdk::Identified for {name} {{"), |w| {
                w.line(format!("type Id = {id_type};"));
                w.blank();
                w.line(format!(
                    "const LOADER: &'static str = {:?};",
                    self.ty.loader_field_name()
                ));
            });
            w.blank();
            w.block(format!("impl sdk::IntoArgValue for {name} {{"), |w| {
                w.block("fn into_arg_value(self) -> sdk::ArgValue {", |w| {
                    w.line("sdk::ArgValue::id_of(&self)");
                });
            });
            w.blank();
            w.block(format!("impl sdk::IntoArgValue for &{name} {{"), |w| {
                w.block("fn into_arg_value(self) -> sdk::ArgValue {", |w| {
                    w.line("sdk::ArgValue::id_of(self)");
                });
            });
        }

        Ok(())
    }

    fn is_chainable(&self) -> bool {
        self.options.chainable_types.iter().any(|t| *t == self.ty.name)
            && self.ty.field("with").is_none()
    }

    fn context(&self, field: &Field) -> String {
        format!("{}.{}", self.ty.name, field.name)
    }

    fn plan(&self, field: &'a Field) -> CodegenResult<FieldPlan<'a>> {
        let context = self.context(field);
        let loader = self.loader_target(field);

        let params = field
            .required_args()
            .map(|arg| self.param(arg, &context, loader.is_some()))
            .collect::<CodegenResult<Vec<_>>>()?;

        let opts = if field.has_optional_args() {
            let fields = field
                .optional_args()
                .map(|arg| {
                    let rust_type = match self.mapper.id_object(&arg.type_ref) {
                        Some(object) => self.mapper.rust_name(&object.name),
                        None => self.mapper.bare_type(&arg.type_ref, &context)?,
                    };
                    Ok(OptField {
                        ident: naming::param_name(&arg.name),
                        rust_type,
                        wire_name: arg.name.clone(),
                        description: arg.description.clone(),
                    })
                })
                .collect::<CodegenResult<Vec<_>>>()?;
            Some(OptsPlan {
                name: naming::opts_name(&self.rust_name, &field.name),
                fields,
            })
        } else {
            None
        };

        Ok(FieldPlan {
            field,
            method: naming::method_name(&field.name),
            params,
            opts,
            shape: self.shape(field, &context)?,
        })
    }

    /// On the root type, `load<T>FromID(id:)` fields become id loaders.
    fn loader_target(&self, field: &Field) -> Option<&'a Type> {
        if !self.is_root || !field.type_ref.is_object() {
            return None;
        }
        let target = self.mapper.schema().get_type(field.type_ref.name())?;
        let id_field = target.id_field()?;
        let single_id_arg = matches!(
            field.args.as_slice(),
            [arg] if arg.name == "id"
                && !arg.is_optional()
                && arg.type_ref.name() == id_field.type_ref.name()
        );
        (single_id_arg && field.name == target.loader_field_name()).then_some(target)
    }

    fn param(&self, arg: &'a InputValue, context: &str, is_loader: bool) -> CodegenResult<Param<'a>> {
        let ident = naming::param_name(&arg.name);

        if !is_loader {
            if let Some(object) = self.mapper.id_object(&arg.type_ref) {
                return Ok(Param {
                    value: arg,
                    rust_type: format!("&{}", self.mapper.rust_name(&object.name)),
                    expr: ident.clone(),
                    ident,
                });
            }
        }

        let bare = self.mapper.bare_type(&arg.type_ref, context)?;
        if bare == "String" && !arg.type_ref.is_list() {
            Ok(Param {
                value: arg,
                rust_type: "impl Into<String>".to_string(),
                expr: format!("{ident}.into()"),
                ident,
            })
        } else {
            Ok(Param {
                value: arg,
                rust_type: bare,
                expr: ident.clone(),
                ident,
            })
        }
    }

    fn shape(&self, field: &Field, context: &str) -> CodegenResult<Shape> {
        let type_ref = &field.type_ref;

        if self.ty.id_field().is_some_and(|id| id.name == field.name) {
            return Ok(Shape::OwnId(self.mapper.bare_type(type_ref, context)?));
        }

        if type_ref.is_list_of_object() {
            let element = type_ref.list_element().map_or("", TypeRef::name);
            let target = self.mapper.lookup(element, context)?;
            if !target.provides_id() {
                return Err(CodegenError::unsupported(
                    context,
                    format!("list of `{element}` requires `{element}` to provide an id"),
                ));
            }
            return Ok(Shape::ObjectList {
                element: self.mapper.rust_name(element),
                optional: type_ref.is_optional(),
            });
        }

        if type_ref.is_object() {
            let target = self.mapper.lookup(type_ref.name(), context)?;
            return Ok(Shape::Object(self.mapper.rust_name(&target.name)));
        }

        if field.returns_parent_id() && self.ty.provides_id() {
            return Ok(Shape::ParentId);
        }

        if type_ref.is_list() {
            let element = type_ref.list_element().map(TypeRef::unwrap_non_null);
            if element.is_some_and(TypeRef::is_scalar) {
                return Ok(if type_ref.is_optional() {
                    Shape::Scalar(self.mapper.value_type(type_ref, context)?)
                } else {
                    Shape::List(self.mapper.bare_type(type_ref, context)?)
                });
            }
        } else if type_ref.is_scalar() {
            return Ok(Shape::Scalar(self.mapper.value_type(type_ref, context)?));
        }

        Err(CodegenError::unsupported(
            context,
            format!("cannot bind a field of type {type_ref}"),
        ))
    }

    fn emit_methods(&self, w: &mut CodeWriter, plan: &FieldPlan<'_>) {
        let field = plan.field;
        let (is_async, returns) = match &plan.shape {
            Shape::OwnId(t) | Shape::List(t) | Shape::Scalar(t) => {
                (true, format!("sdk::SdkResult<{t}>"))
            }
            Shape::ObjectList { element, optional: false } => {
                (true, format!("sdk::SdkResult<Vec<{element}>>"))
            }
            Shape::ObjectList { element, optional: true } => {
                (true, format!("sdk::SdkResult<Option<Vec<{element}>>>"))
            }
            Shape::Object(t) => (false, t.clone()),
            Shape::ParentId => (true, "sdk::SdkResult<Self>".to_string()),
        };
        let fn_kw = if is_async { "pub async fn" } else { "pub fn" };
        let params: Vec<String> = plan
            .params
            .iter()
            .map(|p| format!("{}: {}", p.ident, p.rust_type))
            .collect();

        let doc_text = method_doc(field, &plan.params);
        let doc = |w: &mut CodeWriter| {
            w.doc(doc_text.as_deref());
            w.deprecated(field.is_deprecated, field.deprecation_reason.as_deref());
        };

        if let Some(opts) = &plan.opts {
            doc(w);
            w.block(
                format!("{fn_kw} {}(&self{}) -> {returns} {{", plan.method, join_params(&params)),
                |w| {
                    let forwarded: Vec<&str> = plan.params.iter().map(|p| p.ident.as_str()).collect();
                    let mut call_args = forwarded.join(", ");
                    if !call_args.is_empty() {
                        call_args.push_str(", ");
                    }
                    let wait = if is_async { ".await" } else { "" };
                    w.line(format!(
                        "self.{}_opts({call_args}{}::default()){wait}",
                        plan.method, opts.name
                    ));
                },
            );
            w.blank();

            let mut with_opts = params.clone();
            with_opts.push(format!("opts: {}", opts.name));
            doc(w);
            w.block(
                format!(
                    "{fn_kw} {}_opts(&self{}) -> {returns} {{",
                    plan.method,
                    join_params(&with_opts)
                ),
                |w| self.emit_body(w, plan, true),
            );
        } else {
            doc(w);
            w.block(
                format!("{fn_kw} {}(&self{}) -> {returns} {{", plan.method, join_params(&params)),
                |w| self.emit_body(w, plan, false),
            );
        }
    }

    fn emit_body(&self, w: &mut CodeWriter, plan: &FieldPlan<'_>, with_opts: bool) {
        if let Shape::OwnId(_) = plan.shape {
            w.line("sdk::Identified::resolve_id(self).await");
            return;
        }

        if let (Shape::Object(target), [id]) = (&plan.shape, plan.params.as_slice()) {
            if self.loader_target(plan.field).is_some() {
                w.line(format!(
                    "<{target} as sdk::Identified>::load(self.query.connection(), &{})",
                    id.ident
                ));
                return;
            }
        }

        emit_chain(w, &plan.field.name, &plan.params, with_opts);

        match &plan.shape {
            Shape::Object(target) => w.line(format!("<{target} as sdk::Object>::from_query(query)")),
            Shape::ObjectList { optional: false, .. } => w.line("query.execute_object_list().await"),
            Shape::ObjectList { optional: true, .. } => {
                w.line("query.execute_optional_object_list().await")
            }
            Shape::List(_) => w.line("query.execute_list().await"),
            Shape::Scalar(_) => w.line("query.execute_scalar().await"),
            Shape::ParentId => {
                w.line("query.execute_discard().await?;");
                w.line("Ok(self.clone())");
            }
            Shape::OwnId(_) => {}
        }
    }
}

/// Field description followed by an `# Arguments` list for described
/// required arguments.
fn method_doc(field: &Field, params: &[Param<'_>]) -> Option<String> {
    let described: Vec<String> = params
        .iter()
        .filter_map(|p| {
            let text = p.value.description.as_deref()?.split_whitespace().collect::<Vec<_>>();
            (!text.is_empty()).then(|| format!("* `{}` - {}", p.ident, text.join(" ")))
        })
        .collect();

    let summary = field
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if described.is_empty() {
        return summary.map(str::to_string);
    }

    let mut doc = String::new();
    if let Some(summary) = summary {
        doc.push_str(summary);
        doc.push_str("\n\n");
    }
    doc.push_str("# Arguments\n\n");
    doc.push_str(&described.join("\n"));
    Some(doc)
}

fn join_params(params: &[String]) -> String {
    params.iter().map(|p| format!(", {p}")).collect()
}

fn emit_chain(w: &mut CodeWriter, field: &str, params: &[Param<'_>], with_opts: bool) {
    if params.is_empty() && !with_opts {
        w.line(format!("let query = self.query.select({field:?});"));
        return;
    }

    w.block_with("let query = self.query.chain(", ");", |w| {
        w.line(format!("{field:?},"));
        if params.is_empty() {
            w.line("opts.to_arguments(),");
            return;
        }
        w.line("sdk::Arguments::builder()");
        w.indented(|w| {
            for param in params {
                w.line(format!(".add({:?}, {})", param.value.name, param.expr));
            }
            if with_opts {
                w.line(".build()");
                w.line(".merge(&opts.to_arguments()),");
            } else {
                w.line(".build(),");
            }
        });
    });
}

fn emit_opts(w: &mut CodeWriter, opts: &OptsPlan) {
    w.line("#[derive(Debug, Clone, Default)]");
    w.block(format!("pub struct {} {{", opts.name), |w| {
        for field in &opts.fields {
            w.doc(field.description.as_deref());
            w.line(format!("pub {}: Option<{}>,", field.ident, field.rust_type));
        }
    });
    w.blank();
    w.block(format!("impl {} {{", opts.name), |w| {
        w.block("fn to_arguments(&self) -> sdk::Arguments {", |w| {
            w.line("sdk::Arguments::builder()");
            w.indented(|w| {
                for field in &opts.fields {
                    w.line(format!(
                        ".add_opt({:?}, self.{}.clone())",
                        field.wire_name, field.ident
                    ));
                }
                w.line(".build()");
            });
        });
    });
}

fn emit_root_constructors(w: &mut CodeWriter) {
    w.block("pub fn new(connection: sdk::Connection) -> Self {", |w| {
        w.block("Self {", |w| {
            w.line("query: sdk::QueryBuilder::new(connection),");
        });
    });
    w.blank();
    w.line("/// Connects to the engine described by `config`.");
    w.block(
        "pub async fn connect(config: sdk::ClientConfig) -> sdk::SdkResult<Self> {",
        |w| w.line("sdk::Connection::connect(config).await.map(Self::new)"),
    );
    w.blank();
    w.block("pub fn connection(&self) -> &sdk::Connection {", |w| {
        w.line("self.query.connection()");
    });
}
