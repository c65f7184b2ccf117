/// Entity-scoped operation selected by the envelope's `operation` field.
///
/// The envelope carries the operation as a string; it is parsed during
/// dispatch so an unrecognized value surfaces as a validation failure
/// instead of a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    GetEntry,
    CreateEntry,
    UpdateEntry,
    DeleteEntry,
}

impl Operation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "getAll" => Some(Self::GetAll),
            "getEntry" => Some(Self::GetEntry),
            "createEntry" => Some(Self::CreateEntry),
            "updateEntry" => Some(Self::UpdateEntry),
            "deleteEntry" => Some(Self::DeleteEntry),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAll => "getAll",
            Self::GetEntry => "getEntry",
            Self::CreateEntry => "createEntry",
            Self::UpdateEntry => "updateEntry",
            Self::DeleteEntry => "deleteEntry",
        }
    }

    /// Operations that must address a single entity and therefore require a
    /// non-empty entity id. GetEntry is excluded: without an id it degrades
    /// to a collection read.
    pub fn requires_entity_id(&self) -> bool {
        matches!(self, Self::UpdateEntry | Self::DeleteEntry)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
