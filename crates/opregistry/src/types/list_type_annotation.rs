use crate::types::TypeAnnotation;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ListTypeAnnotation {
    pub(crate) inner_type_ref: Box<TypeAnnotation>,
    pub(crate) nullable: bool,
}
impl ListTypeAnnotation {
    pub fn new(inner: TypeAnnotation, nullable: bool) -> Self {
        Self {
            inner_type_ref: Box::new(inner),
            nullable,
        }
    }

    pub fn inner_type_annotation(&self) -> &TypeAnnotation {
        &self.inner_type_ref
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}
