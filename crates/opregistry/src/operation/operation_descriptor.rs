use crate::ContentHash;
use crate::operation::DescriptorDocument;
use crate::operation::OperationDescriptorBuilder;
use crate::operation::OperationKind;
use crate::operation::Selection;
use crate::operation::VariableDefinition;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// The static, immutable record describing one operation or fragment: its
/// parameters, its selection tree and its canonical text.
///
/// Descriptors are only produced by [`OperationDescriptorBuilder::build`],
/// which computes `content_hash` from `query_text` exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDescriptor {
    pub(crate) content_hash: ContentHash,
    pub(crate) kind: OperationKind,
    pub(crate) name: String,
    pub(crate) query_text: String,
    pub(crate) selections: Vec<Selection>,
    pub(crate) type_condition: Option<String>,
    pub(crate) variable_definitions: IndexMap<String, VariableDefinition>,
}
impl OperationDescriptor {
    pub fn builder(
        name: impl Into<String>,
        kind: OperationKind,
    ) -> OperationDescriptorBuilder {
        OperationDescriptorBuilder::new(name, kind)
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn query_text(&self) -> &str {
        self.query_text.as_str()
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// The type a fragment applies to. Always `None` for executable
    /// operations.
    pub fn type_condition(&self) -> Option<&str> {
        self.type_condition.as_deref()
    }

    /// The type of the object this descriptor's top-level selections apply
    /// to.
    pub fn root_type_name(&self) -> Option<&str> {
        self.type_condition().or(self.kind.root_type_name())
    }

    pub fn variable_definitions(&self) -> &IndexMap<String, VariableDefinition> {
        &self.variable_definitions
    }

    /// Names of the fragments this descriptor references directly (not
    /// transitively), in first-appearance order.
    pub fn fragment_references(&self) -> IndexSet<&str> {
        let mut names = IndexSet::new();
        collect_fragment_references(&self.selections, &mut names);
        names
    }

    /// Convert back into the serializable document form.
    pub fn to_document(&self) -> DescriptorDocument {
        DescriptorDocument {
            kind: self.kind,
            name: self.name.clone(),
            query_text: Some(self.query_text.clone()),
            selections: self.selections.clone(),
            type_condition: self.type_condition.clone(),
            variable_definitions: self.variable_definitions.values().cloned().collect(),
        }
    }
}

fn collect_fragment_references<'a>(
    selections: &'a [Selection],
    names: &mut IndexSet<&'a str>,
) {
    for selection in selections {
        if let Selection::FragmentReference(reference) = selection {
            names.insert(reference.fragment_name());
        }
        collect_fragment_references(selection.children(), names);
    }
}
