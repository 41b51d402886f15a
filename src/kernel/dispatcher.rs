//! Maps the active tab to the editor that owns it.

use compact_str::CompactString;

use crate::models::{FileType, NodeKey, NodeType, RootType};

use super::tabs::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Frontend,
    Backend,
    DbView,
    DbFunction,
    DbProcedure,
    DbTrigger,
    DbTable,
    DbConnection,
    ExternalApi,
    ExternalSystem,
    File,
    DbQuery,
    Settings,
    GitRepo,
    Empty,
}

impl EditorKind {
    pub fn for_type(kind: FileType) -> Self {
        match kind {
            NodeType::Frontend => Self::Frontend,
            NodeType::Backend => Self::Backend,
            NodeType::DbView => Self::DbView,
            NodeType::DbFunc => Self::DbFunction,
            NodeType::DbProc => Self::DbProcedure,
            NodeType::DbTrigger => Self::DbTrigger,
            NodeType::Database | NodeType::DbTable => Self::DbTable,
            NodeType::DbConnection => Self::DbConnection,
            NodeType::ExternalApi => Self::ExternalApi,
            NodeType::ExternalSys => Self::ExternalSystem,
            NodeType::File => Self::File,
            NodeType::DbQuery => Self::DbQuery,
            NodeType::Settings => Self::Settings,
            NodeType::GitRepo => Self::GitRepo,
            NodeType::Folder | NodeType::DbGroup => Self::Empty,
        }
    }
}

/// Everything an editor gets to know about its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorProps {
    pub id: NodeKey,
    pub title: CompactString,
    pub kind: FileType,
    pub root_type: Option<RootType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorMount {
    pub kind: EditorKind,
    pub props: Option<EditorProps>,
}

pub fn dispatch(active: Option<&Tab>) -> EditorMount {
    let Some(tab) = active else {
        return EditorMount {
            kind: EditorKind::Empty,
            props: None,
        };
    };
    EditorMount {
        kind: EditorKind::for_type(tab.kind),
        props: Some(EditorProps {
            id: tab.file_id.clone(),
            title: tab.title.clone(),
            kind: tab.kind,
            root_type: tab.root_type,
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/dispatcher.rs"]
mod tests;
