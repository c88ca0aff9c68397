/// Which kind of GraphQL definition an
/// [`OperationDescriptor`](crate::operation::OperationDescriptor) describes.
///
/// Fragments are registered alongside executable operations so that
/// [`FragmentReference`](crate::operation::FragmentReference)s can be
/// resolved, but only queries, mutations and subscriptions can be sent.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum OperationKind {
    Fragment,
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn is_executable(&self) -> bool {
        !matches!(self, Self::Fragment)
    }

    /// The keyword that opens this kind of definition in GraphQL text.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }

    /// The conventional name of the root type an executable operation
    /// selects from.
    pub fn root_type_name(&self) -> Option<&'static str> {
        match self {
            Self::Fragment => None,
            Self::Mutation => Some("Mutation"),
            Self::Query => Some("Query"),
            Self::Subscription => Some("Subscription"),
        }
    }
}
impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
