/// The single party a transaction is booked against. Records that belong to
/// nobody in particular (owner's personal spending) are `Personal`.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum EntityRef {
    Project(ProjectId),
    Vendor(VendorId),
    Worker(WorkerId),
    Personal,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct ProjectId(pub(crate) String);

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct VendorId(pub(crate) String);

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct WorkerId(pub(crate) String);

// Shorthand constructors.

pub fn project(id: impl Into<String>) -> ProjectId {
    ProjectId(id.into())
}

pub fn vendor(id: impl Into<String>) -> VendorId {
    VendorId(id.into())
}

pub fn worker(id: impl Into<String>) -> WorkerId {
    WorkerId(id.into())
}

// Easy conversion.

macro_rules! impl_into_entity_ref {
    ($typ:ty, $variant:ident) => {
        impl From<$typ> for EntityRef {
            fn from(id: $typ) -> EntityRef {
                EntityRef::$variant(id)
            }
        }

        impl $typ {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_into_entity_ref!(ProjectId, Project);
impl_into_entity_ref!(VendorId, Vendor);
impl_into_entity_ref!(WorkerId, Worker);

impl EntityRef {
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Project(_) => "project",
            EntityRef::Vendor(_) => "vendor",
            EntityRef::Worker(_) => "worker",
            EntityRef::Personal => "personal",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            EntityRef::Project(p) => Some(p.as_str()),
            EntityRef::Vendor(v) => Some(v.as_str()),
            EntityRef::Worker(w) => Some(w.as_str()),
            EntityRef::Personal => None,
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{}:{}", self.kind(), id),
            None => write!(f, "{}", self.kind()),
        }
    }
}
