use crate::template::TemplateNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Sequence,
    /// One alternative per occurrence, cycling through `children`
    Choice,
}

/// Group node of the instance template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupGenerator {
    pub kind: GroupKind,
    pub occurs: usize,
    pub children: Vec<TemplateNode>,
}

impl GroupGenerator {
    pub(crate) fn new(kind: GroupKind, occurs: usize) -> GroupGenerator {
        GroupGenerator {
            kind,
            occurs,
            children: vec![],
        }
    }
}
