//! Dispatch by type kind.

use chainql_schema::{Type, TypeKind};

use crate::error::{CodegenError, CodegenResult};

/// One callback per generatable kind.
pub trait TypeVisitor {
    type Output;

    fn visit_scalar(&mut self, ty: &Type) -> CodegenResult<Self::Output>;
    fn visit_object(&mut self, ty: &Type) -> CodegenResult<Self::Output>;
    fn visit_input_object(&mut self, ty: &Type) -> CodegenResult<Self::Output>;
    fn visit_enum(&mut self, ty: &Type) -> CodegenResult<Self::Output>;
}

/// Routes `ty` to the matching callback.
///
/// Interfaces and unions have no binding shape and fail generation.
pub fn visit<V: TypeVisitor + ?Sized>(visitor: &mut V, ty: &Type) -> CodegenResult<V::Output> {
    match ty.kind {
        TypeKind::Scalar => visitor.visit_scalar(ty),
        TypeKind::Object => visitor.visit_object(ty),
        TypeKind::InputObject => visitor.visit_input_object(ty),
        TypeKind::Enum => visitor.visit_enum(ty),
        kind @ (TypeKind::Interface | TypeKind::Union | TypeKind::List | TypeKind::NonNull) => {
            Err(CodegenError::UnsupportedKind {
                name: ty.name.clone(),
                kind,
            })
        }
    }
}
