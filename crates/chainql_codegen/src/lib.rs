//! Rust binding generator for chainql.
//!
//! Walks a parsed [`Schema`] and emits one source file per type:
//! - custom scalars become string newtypes
//! - enums become Rust enums encoded as bare symbols
//! - input objects become structs encoded as object literals
//! - objects become lazy bindings over `chainql_sdk::QueryBuilder`
//!
//! The root query type is emitted as `Client`. A `mod.rs` declares and
//! re-exports every unit.
//!
//! # Example
//!
//! ```ignore
//! use chainql_codegen::{CodeGenerator, CodegenOptions};
//! use chainql_schema::Schema;
//!
//! let schema = Schema::from_path("introspection.json")?;
//! let files = CodeGenerator::new(&schema).generate()?;
//! CodeGenerator::write_to(&files, "src/gen")?;
//! ```

mod enumeration;
mod error;
mod input;
mod mapping;
mod naming;
mod object;
mod scalar;
mod visitor;
mod writer;

pub use error::{CodegenError, CodegenResult};
pub use visitor::{visit, TypeVisitor};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chainql_schema::{is_builtin_scalar, is_introspection_type, Schema, Type};
use tracing::debug;

use mapping::TypeMapper;
use object::ObjectEmitter;
use writer::CodeWriter;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by chainql. DO NOT EDIT.";

/// Code generation options.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Object types that get a `with(f)` combinator.
    pub chainable_types: Vec<String>,
    /// Rust name of the root query type.
    pub client_name: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            chainable_types: vec!["Container".to_string(), "Directory".to_string()],
            client_name: "Client".to_string(),
        }
    }
}

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
}

/// Main code generator.
pub struct CodeGenerator<'a> {
    schema: &'a Schema,
    options: CodegenOptions,
}

impl<'a> CodeGenerator<'a> {
    /// Creates a generator with default options.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            options: CodegenOptions::default(),
        }
    }

    /// Creates a generator with options.
    pub fn with_options(schema: &'a Schema, options: CodegenOptions) -> Self {
        Self { schema, options }
    }

    /// Sets code generation options.
    pub fn options(mut self, options: CodegenOptions) -> Self {
        self.options = options;
        self
    }

    /// Generates every unit plus `mod.rs`, in schema order.
    pub fn generate(&self) -> CodegenResult<Vec<GeneratedFile>> {
        let mapper = TypeMapper::new(self.schema, &self.options.client_name);
        let mut emitter = RustEmitter {
            mapper: &mapper,
            options: &self.options,
        };

        let mut files = Vec::new();
        let mut modules = BTreeSet::new();
        for ty in self.schema.types().filter(|t| is_generated(t)) {
            let module = naming::module_name(&mapper.rust_name(&ty.name));
            if !modules.insert(module.clone()) {
                return Err(CodegenError::unsupported(
                    &ty.name,
                    format!("module `{module}` would be generated twice"),
                ));
            }

            let body = visit(&mut emitter, ty)?;
            let path = PathBuf::from(format!("{module}.rs"));
            debug!(r#type = %ty.name, path = %path.display(), "generated binding");
            files.push(GeneratedFile {
                path,
                contents: unit(&body),
            });
        }

        files.push(GeneratedFile {
            path: PathBuf::from("mod.rs"),
            contents: mod_file(&modules),
        });
        Ok(files)
    }

    /// Writes `files` under `dir`, creating it if needed.
    pub fn write_to(files: &[GeneratedFile], dir: impl AsRef<Path>) -> CodegenResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        for file in files {
            std::fs::write(dir.join(&file.path), &file.contents)?;
        }
        debug!(count = files.len(), dir = %dir.display(), "wrote generated files");
        Ok(())
    }
}

/// Built-in scalars and introspection types get no binding.
fn is_generated(ty: &Type) -> bool {
    !is_introspection_type(&ty.name) && !is_builtin_scalar(&ty.name)
}

struct RustEmitter<'a, 'm> {
    mapper: &'m TypeMapper<'a>,
    options: &'m CodegenOptions,
}

impl TypeVisitor for RustEmitter<'_, '_> {
    type Output = String;

    fn visit_scalar(&mut self, ty: &Type) -> CodegenResult<String> {
        let mut w = CodeWriter::new();
        scalar::emit(&mut w, ty);
        Ok(w.finish())
    }

    fn visit_object(&mut self, ty: &Type) -> CodegenResult<String> {
        let mut w = CodeWriter::new();
        ObjectEmitter::new(self.mapper, self.options, ty).emit(&mut w)?;
        Ok(w.finish())
    }

    fn visit_input_object(&mut self, ty: &Type) -> CodegenResult<String> {
        let mut w = CodeWriter::new();
        input::emit(&mut w, self.mapper, ty)?;
        Ok(w.finish())
    }

    fn visit_enum(&mut self, ty: &Type) -> CodegenResult<String> {
        let mut w = CodeWriter::new();
        enumeration::emit(&mut w, ty);
        Ok(w.finish())
    }
}

fn unit(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 160);
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n#![allow(deprecated, unused_imports)]\n\n");
    out.push_str("use super::*;\nuse chainql_sdk as sdk;\n\n");
    out.push_str(body);
    out
}

fn mod_file(modules: &BTreeSet<String>) -> String {
    let mut w = CodeWriter::new();
    w.line(GENERATED_HEADER);
    w.blank();
    for module in modules {
        w.line(format!("mod {module};"));
    }
    w.blank();
    for module in modules {
        w.line(format!("pub use {module}::*;"));
    }
    w.finish()
}
