mod argument_value;
mod descriptor_document;
mod operation_descriptor;
mod operation_descriptor_builder;
mod operation_kind;
pub(crate) mod printer;
mod selection;
mod variable;

pub use argument_value::ArgumentValue;
pub use descriptor_document::DescriptorDocument;
pub use descriptor_document::DescriptorLoadError;
pub use operation_descriptor::OperationDescriptor;
pub use operation_descriptor_builder::OperationDescriptorBuilder;
pub use operation_descriptor_builder::OperationDescriptorBuildError;
pub use operation_kind::OperationKind;
pub use selection::FragmentReference;
pub use selection::LinkedField;
pub use selection::ScalarField;
pub use selection::Selection;
pub use selection::TypeBranch;
pub use variable::VariableDefinition;
