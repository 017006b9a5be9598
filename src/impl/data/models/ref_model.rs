/// Reference to another document: either a bare id, or the populated document
/// itself.
#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize)]
#[serde(untagged)]
pub(crate) enum RefModel {
    Id(String),
    Populated {
        #[serde(rename = "_id", default)]
        object_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RefModel {
    pub(crate) fn id(&self) -> Option<&str> {
        match self {
            RefModel::Id(id) => Some(id.as_str()),
            RefModel::Populated { object_id, id, .. } => object_id.as_deref().or(id.as_deref()),
        }
        .filter(|id| !id.trim().is_empty())
    }

    /// Name if populated, otherwise the id.
    pub(crate) fn display(&self) -> Option<String> {
        match self {
            RefModel::Populated {
                name: Some(name), ..
            } => Some(name.clone()),
            _ => self.id().map(str::to_string),
        }
    }
}
