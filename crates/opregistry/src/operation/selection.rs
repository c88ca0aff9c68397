use crate::operation::ArgumentValue;
use indexmap::IndexMap;

fn default_true() -> bool {
    true
}

/// One node of an operation's selection tree.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind")]
pub enum Selection {
    Scalar(ScalarField),
    LinkedObject(LinkedField),
    /// Selections applied only when the object's discriminator equals the
    /// branch's declared type (an inline fragment `... on Type`).
    TypeBranch(TypeBranch),
    FragmentReference(FragmentReference),
}
impl Selection {
    /// The key this selection writes into a response object, if it writes
    /// one directly. Type branches and fragment references contribute their
    /// children's keys instead.
    pub fn response_key(&self) -> Option<&str> {
        match self {
            Self::Scalar(field) => Some(field.response_key()),
            Self::LinkedObject(field) => Some(field.response_key()),
            Self::TypeBranch(_) | Self::FragmentReference(_) => None,
        }
    }

    /// Nested selections, for the variants that have any.
    pub fn children(&self) -> &[Selection] {
        match self {
            Self::LinkedObject(field) => &field.children,
            Self::TypeBranch(branch) => &branch.children,
            Self::Scalar(_) | Self::FragmentReference(_) => &[],
        }
    }
}
impl From<ScalarField> for Selection {
    fn from(value: ScalarField) -> Self {
        Self::Scalar(value)
    }
}
impl From<LinkedField> for Selection {
    fn from(value: LinkedField) -> Self {
        Self::LinkedObject(value)
    }
}
impl From<TypeBranch> for Selection {
    fn from(value: TypeBranch) -> Self {
        Self::TypeBranch(value)
    }
}
impl From<FragmentReference> for Selection {
    fn from(value: FragmentReference) -> Self {
        Self::FragmentReference(value)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) alias: Option<String>,
    #[serde(default, rename = "args", skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) arguments: IndexMap<String, ArgumentValue>,
    #[serde(rename = "name")]
    pub(crate) field_name: String,
    #[serde(default = "default_true")]
    pub(crate) nullable: bool,
}
impl ScalarField {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            alias: None,
            arguments: IndexMap::new(),
            field_name: field_name.into(),
            nullable: true,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentValue> {
        &self.arguments
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// If an alias was specified for this selection, return the alias.
    /// Otherwise return the name of the field.
    pub fn response_key(&self) -> &str {
        self.alias().unwrap_or(self.field_name.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) alias: Option<String>,
    #[serde(default, rename = "args", skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) arguments: IndexMap<String, ArgumentValue>,
    #[serde(rename = "selections")]
    pub(crate) children: Vec<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) concrete_type: Option<String>,
    #[serde(rename = "name")]
    pub(crate) field_name: String,
    #[serde(default = "default_true")]
    pub(crate) nullable: bool,
    #[serde(default)]
    pub(crate) plural: bool,
}
impl LinkedField {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            alias: None,
            arguments: IndexMap::new(),
            children: vec![],
            concrete_type: None,
            field_name: field_name.into(),
            nullable: true,
            plural: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Selection>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Record the concrete type the schema guarantees for this field, used
    /// as the discriminator when a response object omits one.
    pub fn with_concrete_type(mut self, type_name: impl Into<String>) -> Self {
        self.concrete_type = Some(type_name.into());
        self
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentValue> {
        &self.arguments
    }

    pub fn children(&self) -> &[Selection] {
        &self.children
    }

    pub fn concrete_type(&self) -> Option<&str> {
        self.concrete_type.as_deref()
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    pub fn is_plural(&self) -> bool {
        self.plural
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn response_key(&self) -> &str {
        self.alias().unwrap_or(self.field_name.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBranch {
    #[serde(rename = "selections")]
    pub(crate) children: Vec<Selection>,
    #[serde(rename = "type")]
    pub(crate) declared_type: String,
}
impl TypeBranch {
    pub fn new(declared_type: impl Into<String>) -> Self {
        Self {
            children: vec![],
            declared_type: declared_type.into(),
        }
    }

    pub fn with_child(mut self, child: impl Into<Selection>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(&self) -> &[Selection] {
        &self.children
    }

    pub fn declared_type(&self) -> &str {
        self.declared_type.as_str()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentReference {
    #[serde(rename = "name")]
    pub(crate) fragment_name: String,
    #[serde(default, rename = "args", skip_serializing_if = "IndexMap::is_empty")]
    pub(crate) provided_arguments: IndexMap<String, ArgumentValue>,
}
impl FragmentReference {
    pub fn new(fragment_name: impl Into<String>) -> Self {
        Self {
            fragment_name: fragment_name.into(),
            provided_arguments: IndexMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.provided_arguments.insert(name.into(), value);
        self
    }

    pub fn fragment_name(&self) -> &str {
        self.fragment_name.as_str()
    }

    pub fn provided_arguments(&self) -> &IndexMap<String, ArgumentValue> {
        &self.provided_arguments
    }
}
