//! Project node taxonomy.

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type NodeKey = CompactString;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "folder")]
    Folder,
    #[serde(rename = "dbGroup")]
    DbGroup,
    #[serde(rename = "dbConnection")]
    DbConnection,
    #[serde(rename = "externalSys")]
    ExternalSys,
    #[serde(rename = "frontend")]
    Frontend,
    #[serde(rename = "backend")]
    Backend,
    #[serde(rename = "database")]
    Database,
    #[serde(rename = "externalApi")]
    ExternalApi,
    #[serde(rename = "dbTable")]
    DbTable,
    #[serde(rename = "dbView")]
    DbView,
    #[serde(rename = "dbFunc")]
    DbFunc,
    #[serde(rename = "dbProc")]
    DbProc,
    #[serde(rename = "dbTrigger")]
    DbTrigger,
    #[serde(rename = "dbQuery")]
    DbQuery,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "settings")]
    Settings,
    #[serde(rename = "git_repo")]
    GitRepo,
}

/// Tabs carry the same tag as the node they were opened from.
pub type FileType = NodeType;

impl NodeType {
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Folder | Self::DbGroup | Self::DbConnection | Self::ExternalSys
        )
    }

    pub fn is_lazy(self) -> bool {
        matches!(self, Self::DbGroup)
    }

    /// Containers with a fixed shape and a dedicated editor.
    pub fn is_system_container(self) -> bool {
        matches!(self, Self::DbConnection | Self::ExternalSys)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::DbGroup => "dbGroup",
            Self::DbConnection => "dbConnection",
            Self::ExternalSys => "externalSys",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::ExternalApi => "externalApi",
            Self::DbTable => "dbTable",
            Self::DbView => "dbView",
            Self::DbFunc => "dbFunc",
            Self::DbProc => "dbProc",
            Self::DbTrigger => "dbTrigger",
            Self::DbQuery => "dbQuery",
            Self::File => "file",
            Self::Settings => "settings",
            Self::GitRepo => "git_repo",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootType {
    Pages,
    Apps,
    Apis,
    Models,
    External,
}

impl RootType {
    pub const ALL: [RootType; 5] = [
        RootType::Pages,
        RootType::Apps,
        RootType::Apis,
        RootType::Models,
        RootType::External,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Apps => "apps",
            Self::Apis => "apis",
            Self::Models => "models",
            Self::External => "external",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Pages => "Pages",
            Self::Apps => "Apps",
            Self::Apis => "APIs",
            Self::Models => "Data Models",
            Self::External => "External Systems",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Pages => 0,
            Self::Apps => 1,
            Self::Apis => 2,
            Self::Models => 3,
            Self::External => 4,
        }
    }

    pub fn supports_git(self) -> bool {
        matches!(self, Self::Pages | Self::Apps | Self::Apis)
    }

    /// Leaf type produced by "New File" in this root.
    pub fn default_leaf(self) -> NodeType {
        match self {
            Self::Pages | Self::Apps => NodeType::Frontend,
            Self::Apis => NodeType::Backend,
            Self::Models => NodeType::DbTable,
            Self::External => NodeType::ExternalApi,
        }
    }
}

impl fmt::Display for RootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six fixed groups under every database connection, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DbGroupKind {
    Tables,
    Views,
    Functions,
    Procedures,
    Triggers,
    Queries,
}

impl DbGroupKind {
    pub const ALL: [DbGroupKind; 6] = [
        DbGroupKind::Tables,
        DbGroupKind::Views,
        DbGroupKind::Functions,
        DbGroupKind::Procedures,
        DbGroupKind::Triggers,
        DbGroupKind::Queries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Tables => "Tables",
            Self::Views => "Views",
            Self::Functions => "Functions",
            Self::Procedures => "Procedures",
            Self::Triggers => "Triggers",
            Self::Queries => "Queries",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn leaf_type(self) -> NodeType {
        match self {
            Self::Tables => NodeType::DbTable,
            Self::Views => NodeType::DbView,
            Self::Functions => NodeType::DbFunc,
            Self::Procedures => NodeType::DbProc,
            Self::Triggers => NodeType::DbTrigger,
            Self::Queries => NodeType::DbQuery,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeKey,
    pub name: CompactString,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Arc<Node>>>,
    #[serde(default, skip_serializing)]
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeKey>,
    #[serde(skip)]
    pub load_state: LoadState,
}

impl Node {
    pub fn new(id: impl Into<NodeKey>, name: impl Into<CompactString>, kind: NodeType) -> Self {
        let children = match kind {
            NodeType::Folder | NodeType::DbConnection | NodeType::ExternalSys => Some(Vec::new()),
            _ => None,
        };
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children,
            is_open: false,
            last_modified: None,
            parent_id: None,
            load_state: LoadState::Unloaded,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<NodeKey>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        let parent = self.id.clone();
        self.children = Some(
            children
                .into_iter()
                .map(|child| Arc::new(child.with_parent(Some(parent.clone()))))
                .collect(),
        );
        self
    }

    /// Builds a connection and its six groups in one step.
    pub fn connection(name: impl Into<CompactString>, mut next_id: impl FnMut() -> NodeKey) -> Self {
        let conn = Node::new(next_id(), name, NodeType::DbConnection);
        let groups = DbGroupKind::ALL
            .into_iter()
            .map(|kind| Node::new(next_id(), kind.name(), NodeType::DbGroup))
            .collect();
        conn.with_children(groups)
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Substring after the last `.`, if any.
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// The group kind for dbGroup nodes, resolved by name.
    pub fn db_group_kind(&self) -> Option<DbGroupKind> {
        if self.kind != NodeType::DbGroup {
            return None;
        }
        DbGroupKind::from_name(&self.name)
    }

    /// Whether expanding this node must go to the backend first.
    pub fn needs_fetch(&self) -> bool {
        self.kind.is_lazy()
            && !self.is_open
            && matches!(self.load_state, LoadState::Unloaded | LoadState::Failed)
            && !self.has_children()
    }

    /// Whether `child` may be moved directly under this node.
    ///
    /// A connection's children are its six groups and nothing else; groups
    /// only hold their own leaf type; external systems only hold APIs.
    pub fn accepts_child(&self, child: &Node) -> bool {
        match self.kind {
            NodeType::Folder => !child.kind.is_system_container() && !child.kind.is_lazy(),
            NodeType::DbGroup => self
                .db_group_kind()
                .is_some_and(|group| group.leaf_type() == child.kind),
            NodeType::ExternalSys => child.kind == NodeType::ExternalApi,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNode {
    pub name: CompactString,
    #[serde(rename = "type")]
    pub kind: NodeType,
}

impl NewNode {
    pub fn new(name: impl Into<CompactString>, kind: NodeType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CompactString>,
}

/// Top-level creates in `models` and `external` always produce the root's system container.
pub fn normalize_create(root: RootType, parent: Option<&str>, new_node: NewNode) -> NewNode {
    match (root, parent) {
        (RootType::Models, None) => NewNode::new(new_node.name, NodeType::DbConnection),
        (RootType::External, None) => NewNode::new(new_node.name, NodeType::ExternalSys),
        _ => new_node,
    }
}

/// `page.html` -> `page_copy.html`
pub fn copy_name(name: &str) -> CompactString {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format_compact!("{stem}_copy.{ext}"),
        _ => format_compact!("{name}_copy"),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IconKind {
    Folder,
    FolderOpen,
    DbGroup,
    Database,
    Table,
    View,
    Function,
    Procedure,
    Trigger,
    Query,
    ExternalSystem,
    Api,
    Page,
    Flow,
    Html,
    Script,
    Style,
    Json,
    Sql,
    Markdown,
    Image,
    Settings,
    Git,
    File,
}

pub fn icon_family(node: &Node) -> IconKind {
    icon_by_type(node.kind)
        .or_else(|| {
            if node.is_container() {
                None
            } else {
                node.extension().and_then(icon_by_extension)
            }
        })
        .unwrap_or_else(|| generic_icon(node))
}

fn icon_by_type(kind: NodeType) -> Option<IconKind> {
    let icon = match kind {
        NodeType::DbTable => IconKind::Table,
        NodeType::DbView => IconKind::View,
        NodeType::DbFunc => IconKind::Function,
        NodeType::DbProc => IconKind::Procedure,
        NodeType::DbTrigger => IconKind::Trigger,
        NodeType::DbQuery => IconKind::Query,
        NodeType::DbConnection => IconKind::Database,
        NodeType::DbGroup => IconKind::DbGroup,
        NodeType::ExternalSys => IconKind::ExternalSystem,
        NodeType::ExternalApi => IconKind::Api,
        NodeType::Settings => IconKind::Settings,
        NodeType::GitRepo => IconKind::Git,
        NodeType::Folder
        | NodeType::Frontend
        | NodeType::Backend
        | NodeType::Database
        | NodeType::File => return None,
    };
    Some(icon)
}

fn icon_by_extension(ext: &str) -> Option<IconKind> {
    let icon = match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => IconKind::Html,
        "js" | "ts" | "jsx" | "tsx" | "vue" => IconKind::Script,
        "css" | "scss" | "less" => IconKind::Style,
        "json" => IconKind::Json,
        "sql" => IconKind::Sql,
        "md" | "markdown" => IconKind::Markdown,
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" => IconKind::Image,
        "flow" => IconKind::Flow,
        "page" => IconKind::Page,
        _ => return None,
    };
    Some(icon)
}

fn generic_icon(node: &Node) -> IconKind {
    match node.kind {
        NodeType::Folder if node.is_open => IconKind::FolderOpen,
        NodeType::Folder => IconKind::Folder,
        NodeType::Frontend => IconKind::Page,
        NodeType::Backend => IconKind::Flow,
        NodeType::Database => IconKind::Database,
        _ => IconKind::File,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/node.rs"]
mod tests;
