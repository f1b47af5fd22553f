use env_logger::Env;
use iced::widget::{Space, container, row, text};
use iced::{Color, Element, Length, Point};
use kreme_tree::{
    DropZone, Folder, NodeId, TreeConfig, TreeEvent, TreeNode, TreeStore,
};
use kreme_ui_tree::{DragSession, RowLayout, TreeRowContext, TreeView};

const LAYOUT: RowLayout = RowLayout {
    row_height: 26.0,
    spacing: 0.0,
};

#[derive(Debug, Clone)]
enum Message {
    Pressed(NodeId),
    Released(NodeId),
    BackgroundReleased,
    Hover(Option<NodeId>),
    CursorMoved(Point),
    Toggle(NodeId),
}

struct AppState {
    store: TreeStore,
    session: Option<DragSession>,
    selected: Option<NodeId>,
    hovered: Option<NodeId>,
    cursor: Point,
}

impl Default for AppState {
    fn default() -> Self {
        let config = TreeConfig::default().with_open_on_drop(true);
        let mut store = TreeStore::new(sample_tree(), config)
            .expect("sample tree has unique ids");
        store.subscribe(|event| match event {
            TreeEvent::Dropped(summary) => log::info!(
                "moved {} from {} into {}",
                summary.source_id,
                summary.source_parent.name,
                summary.target_parent.name
            ),
            TreeEvent::SnapshotChanged(_) => {},
            other => log::debug!("{other:?}"),
        });

        Self {
            store,
            session: None,
            selected: None,
            hovered: None,
            cursor: Point::ORIGIN,
        }
    }
}

fn sample_tree() -> Vec<TreeNode> {
    vec![
        TreeNode::Folder(Folder::new(1, "src").open(true).with_children(vec![
            TreeNode::file(2, "main.rs"),
            TreeNode::file(3, "lib.rs"),
            TreeNode::folder(4, "bin", vec![TreeNode::file(5, "cli.rs")]),
        ])),
        TreeNode::folder(6, "docs", vec![]),
        TreeNode::file(7, "Cargo.toml"),
        TreeNode::file(8, "README.md"),
    ]
}

fn update(state: &mut AppState, message: Message) {
    match message {
        Message::Pressed(id) => {
            state.session = DragSession::press(&state.store, &id, state.cursor);
        },
        Message::Released(_) | Message::BackgroundReleased => release(state),
        Message::Hover(id) => {
            state.hovered = id;
        },
        Message::CursorMoved(position) => {
            state.cursor = position;
            if let Some(session) = state.session.as_mut() {
                let rows = state.store.rows();
                session.cursor_moved(
                    &rows,
                    &LAYOUT,
                    state.store.config().zones,
                    position,
                );
            }
        },
        Message::Toggle(id) => {
            state.store.click_chevron(&id);
        },
    }
}

fn release(state: &mut AppState) {
    let Some(session) = state.session.take() else {
        return;
    };

    if session.is_active() {
        session.finish(&mut state.store);
        return;
    }

    let id = session.item().id.clone();
    if state.store.click_file(&id) {
        state.selected = Some(id);
    } else {
        state.store.click_label(&id);
    }
}

fn view(state: &AppState) -> Element<'_, Message> {
    TreeView::new(state.store.nodes(), render_row)
        .selected(state.selected.as_ref())
        .hovered(state.hovered.as_ref())
        .drop_hint(state.session.as_ref().and_then(DragSession::hint))
        .on_press(Message::Pressed)
        .on_release(Message::Released)
        .on_background_release(Message::BackgroundReleased)
        .on_hover(Message::Hover)
        .on_toggle_folder(Message::Toggle)
        .on_cursor_move(Message::CursorMoved)
        .layout(LAYOUT)
        .row_style(row_style)
        .toggle_content(toggle_icon)
        .toggle_width(16.0)
        .indent_width(14.0)
        .view()
}

fn render_row<'a>(context: &TreeRowContext<'a>) -> Element<'a, Message> {
    let marker = match context.drop_zone {
        Some(DropZone::Top) => "^ ",
        Some(DropZone::Middle) => "> ",
        Some(DropZone::Bottom) => "v ",
        Some(DropZone::None) | None => "",
    };
    let label = format!("{marker}{}", context.entry.node.name());

    container(row![text(label)].spacing(6))
        .padding([4, 8])
        .width(Length::Fill)
        .into()
}

fn row_style(context: &TreeRowContext<'_>) -> container::Style {
    let background = if context.drop_zone == Some(DropZone::Middle) {
        Some(Color::from_rgb(0.2, 0.35, 0.2).into())
    } else if context.is_selected {
        Some(Color::from_rgb(0.12, 0.26, 0.46).into())
    } else if context.is_hovered {
        Some(Color::from_rgb(0.18, 0.18, 0.18).into())
    } else {
        None
    };

    container::Style {
        background,
        text_color: Some(Color::from_rgb(0.9, 0.9, 0.9)),
        ..Default::default()
    }
}

fn toggle_icon<'a>(context: &TreeRowContext<'a>) -> Element<'a, Message> {
    if context.entry.node.is_folder() {
        let label = if context.entry.node.is_open() {
            "[-]"
        } else {
            "[+]"
        };
        text(label).into()
    } else {
        Space::new().width(Length::Fixed(16.0)).into()
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .init();
    iced::run(update, view)
}
