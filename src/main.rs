//! Headless demo: boots a workspace against the seeded mock backend and prints
//! the explorer, the tab strip and the mounted editor.

use std::io;
use std::time::Duration;

use zstudio::app::Workspace;
use zstudio::kernel::services::adapters::load_settings;
use zstudio::kernel::{Action, ExplorerSection, RootLoad};
use zstudio::models::{NodeType, RootType};

mod logging;

use logging::LogHandle;

const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> io::Result<()> {
    let show_logs = std::env::args().any(|arg| arg == "--logs");
    let mut logs = logging::init();
    let settings = load_settings();

    let (mut workspace, _backend) = Workspace::with_mock_backend(&settings)?;
    if let Some(feed) = logs.as_mut().and_then(LogHandle::take_feed) {
        workspace.attach_log_feed(feed);
    }
    workspace.boot();
    if !workspace.run_until_idle(IDLE_TIMEOUT) {
        eprintln!("backend did not answer within {IDLE_TIMEOUT:?}");
    }

    expand_first_connection(&mut workspace);
    if !workspace.run_until_idle(IDLE_TIMEOUT) {
        eprintln!("backend did not answer within {IDLE_TIMEOUT:?}");
    }

    for section in workspace.sections() {
        print_section(&section);
    }
    print_tabs(&workspace);

    if let (true, Some(logs)) = (show_logs, &logs) {
        workspace.pump();
        println!("\n-- log ({}) --", logs.dir().display());
        for line in &workspace.state().ui.layout.bottom_panel.log {
            println!("{line}");
        }
    }
    Ok(())
}

/// Opens the first connection and its Tables group so the lazy load shows up.
fn expand_first_connection(workspace: &mut Workspace) {
    let Some(conn) = workspace
        .state()
        .tree
        .nodes(RootType::Models)
        .iter()
        .find(|n| n.kind == NodeType::DbConnection)
        .cloned()
    else {
        return;
    };
    workspace.dispatch(Action::ExplorerClick {
        root: RootType::Models,
        id: conn.id.clone(),
    });
    let tables = conn
        .children
        .iter()
        .flatten()
        .find(|g| g.kind == NodeType::DbGroup && g.name == "Tables");
    if let Some(tables) = tables {
        workspace.dispatch(Action::ExplorerClick {
            root: RootType::Models,
            id: tables.id.clone(),
        });
    }
}

fn print_section(section: &ExplorerSection) {
    let status = match section.load {
        RootLoad::NotLoaded => " (not loaded)",
        RootLoad::Loading => " (loading)",
        RootLoad::Failed => " (failed)",
        RootLoad::Loaded => "",
    };
    let marker = if section.collapsed { '+' } else { '-' };
    println!("{marker} {}{status}", section.title);
    for row in &section.rows {
        let indent = "  ".repeat(usize::from(row.depth) + 1);
        let glyph = match (row.is_container, row.is_open) {
            (true, true) => "v ",
            (true, false) => "> ",
            (false, _) => "  ",
        };
        println!("{indent}{glyph}{} [{}]", row.name, row.kind);
    }
}

fn print_tabs(workspace: &Workspace) {
    let tabs = &workspace.state().tabs;
    let active = tabs.active_id();
    let strip: Vec<String> = tabs
        .tabs()
        .iter()
        .map(|tab| {
            if Some(tab.id) == active {
                format!("*{}*", tab.title)
            } else {
                tab.title.to_string()
            }
        })
        .collect();
    println!("\ntabs: {}", strip.join(" | "));

    let editor = workspace.editor();
    match editor.props {
        Some(props) => println!("editor: {:?} -> {} ({})", editor.kind, props.title, props.id),
        None => println!("editor: {:?}", editor.kind),
    }
}
