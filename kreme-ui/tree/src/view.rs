use iced::widget::{Column, Row, Space, container, mouse_area};
use iced::{Element, Length, Point, alignment, mouse};
use kreme_tree::{DropZone, FlattenedNode, NodeId, TreeNode, flatten_tree};

use crate::drag::DropHint;
use crate::layout::RowLayout;

/// Rendering context passed to row callbacks.
pub struct TreeRowContext<'a> {
    pub entry: FlattenedNode<'a>,
    /// Position among the rendered rows.
    pub visible_index: usize,
    pub is_selected: bool,
    pub is_hovered: bool,
    /// Zone highlighted on this row by an active drag.
    pub drop_zone: Option<DropZone>,
}

impl TreeRowContext<'_> {
    pub fn id(&self) -> &NodeId {
        self.entry.node.id()
    }
}

type RowRenderer<'a, Message> =
    dyn Fn(&TreeRowContext<'a>) -> Element<'a, Message> + 'a;
type RowStyle<'a> = dyn Fn(&TreeRowContext<'a>) -> container::Style + 'a;
type RowAction<'a, Message> = dyn Fn(NodeId) -> Message + 'a;
type HoverAction<'a, Message> = dyn Fn(Option<NodeId>) -> Message + 'a;
type CursorAction<'a, Message> = dyn Fn(Point) -> Message + 'a;
type RowPredicate<'a> = dyn Fn(&TreeRowContext<'a>) -> bool + 'a;
type RowExtra<'a, Message> =
    dyn Fn(&TreeRowContext<'a>) -> Option<Element<'a, Message>> + 'a;

/// Tree view over a [`TreeNode`] snapshot with drag-and-drop hooks.
///
/// Rows have a fixed height so pointer positions reported through
/// [`TreeView::on_cursor_move`] map back to rows with the view's
/// [`RowLayout`].
pub struct TreeView<'a, Message: Clone + 'a> {
    nodes: &'a [TreeNode],
    selected: Option<&'a NodeId>,
    hovered: Option<&'a NodeId>,
    drop_hint: Option<&'a DropHint>,
    on_press: Option<Box<RowAction<'a, Message>>>,
    on_release: Option<Box<RowAction<'a, Message>>>,
    on_hover: Option<Box<HoverAction<'a, Message>>>,
    on_toggle_folder: Option<Box<RowAction<'a, Message>>>,
    on_cursor_move: Option<Box<CursorAction<'a, Message>>>,
    on_background_release: Option<Message>,
    render_row: Box<RowRenderer<'a, Message>>,
    row_style: Option<Box<RowStyle<'a>>>,
    toggle_content: Option<Box<RowRenderer<'a, Message>>>,
    row_visible: Option<Box<RowPredicate<'a>>>,
    after_row: Option<Box<RowExtra<'a, Message>>>,
    layout: RowLayout,
    indent_width: f32,
    toggle_width: f32,
}

impl<'a, Message> TreeView<'a, Message>
where
    Message: Clone + 'a,
{
    /// Create a tree view that renders each row using `render_row`.
    pub fn new(
        nodes: &'a [TreeNode],
        render_row: impl Fn(&TreeRowContext<'a>) -> Element<'a, Message> + 'a,
    ) -> Self {
        Self {
            nodes,
            selected: None,
            hovered: None,
            drop_hint: None,
            on_press: None,
            on_release: None,
            on_hover: None,
            on_toggle_folder: None,
            on_cursor_move: None,
            on_background_release: None,
            render_row: Box::new(render_row),
            row_style: None,
            toggle_content: None,
            row_visible: None,
            after_row: None,
            layout: RowLayout::default(),
            indent_width: 0.0,
            toggle_width: 0.0,
        }
    }

    pub fn selected(mut self, id: Option<&'a NodeId>) -> Self {
        self.selected = id;
        self
    }

    pub fn hovered(mut self, id: Option<&'a NodeId>) -> Self {
        self.hovered = id;
        self
    }

    /// Highlight the row (or background) an active drag points at.
    pub fn drop_hint(mut self, hint: Option<&'a DropHint>) -> Self {
        self.drop_hint = hint;
        self
    }

    /// Emit a message when a row receives a left press.
    pub fn on_press(
        mut self,
        on_press: impl Fn(NodeId) -> Message + 'a,
    ) -> Self {
        self.on_press = Some(Box::new(on_press));
        self
    }

    /// Emit a message when a row receives a left release.
    pub fn on_release(
        mut self,
        on_release: impl Fn(NodeId) -> Message + 'a,
    ) -> Self {
        self.on_release = Some(Box::new(on_release));
        self
    }

    /// Emit a message when the pointer enters or leaves a row.
    pub fn on_hover(
        mut self,
        on_hover: impl Fn(Option<NodeId>) -> Message + 'a,
    ) -> Self {
        self.on_hover = Some(Box::new(on_hover));
        self
    }

    /// Emit a message when a folder toggle is clicked.
    pub fn on_toggle_folder(
        mut self,
        on_toggle: impl Fn(NodeId) -> Message + 'a,
    ) -> Self {
        self.on_toggle_folder = Some(Box::new(on_toggle));
        self
    }

    /// Report pointer positions relative to the top of the first row.
    pub fn on_cursor_move(
        mut self,
        on_move: impl Fn(Point) -> Message + 'a,
    ) -> Self {
        self.on_cursor_move = Some(Box::new(on_move));
        self
    }

    /// Emit a message when the left button is released anywhere in the view.
    pub fn on_background_release(mut self, message: Message) -> Self {
        self.on_background_release = Some(message);
        self
    }

    pub fn row_style(
        mut self,
        row_style: impl Fn(&TreeRowContext<'a>) -> container::Style + 'a,
    ) -> Self {
        self.row_style = Some(Box::new(row_style));
        self
    }

    /// Provide content to render inside the toggle area.
    pub fn toggle_content(
        mut self,
        toggle_content: impl Fn(&TreeRowContext<'a>) -> Element<'a, Message> + 'a,
    ) -> Self {
        self.toggle_content = Some(Box::new(toggle_content));
        self
    }

    /// Control whether a row is rendered.
    ///
    /// Hidden rows are not part of the [`RowLayout`] mapping, so pointer
    /// positions must be matched against the rendered rows only.
    pub fn row_visible(
        mut self,
        row_visible: impl Fn(&TreeRowContext<'a>) -> bool + 'a,
    ) -> Self {
        self.row_visible = Some(Box::new(row_visible));
        self
    }

    /// Insert content after a given row, e.g. an inline rename input.
    ///
    /// Extra content shifts the rows below it, so keep it out of the way
    /// while a drag is active.
    pub fn after_row(
        mut self,
        after_row: impl Fn(&TreeRowContext<'a>) -> Option<Element<'a, Message>>
        + 'a,
    ) -> Self {
        self.after_row = Some(Box::new(after_row));
        self
    }

    pub fn layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set indentation width per tree depth level.
    pub fn indent_width(mut self, width: f32) -> Self {
        self.indent_width = width.max(0.0);
        self
    }

    /// Set the width reserved for the toggle area.
    pub fn toggle_width(mut self, width: f32) -> Self {
        self.toggle_width = width.max(0.0);
        self
    }

    /// Build the `Element` for the tree view.
    pub fn view(self) -> Element<'a, Message> {
        let mut column = Column::new().spacing(self.layout.spacing);
        let mut visible_index = 0;

        for entry in flatten_tree(self.nodes) {
            let id = entry.node.id().clone();
            let context = TreeRowContext {
                is_selected: self.selected == Some(&id),
                is_hovered: self.hovered == Some(&id),
                drop_zone: self.drop_hint.and_then(|hint| hint.zone_for(&id)),
                visible_index,
                entry,
            };

            let is_visible = self
                .row_visible
                .as_ref()
                .is_none_or(|predicate| predicate(&context));

            if is_visible {
                column = column.push(self.build_row(&context, &id));
                visible_index += 1;
            }

            if let Some(ref after_row) = self.after_row
                && let Some(extra) = after_row(&context)
            {
                column = column.push(extra);
            }
        }

        let mut area = mouse_area(
            container(column).width(Length::Fill).height(Length::Fill),
        );
        if let Some(on_move) = self.on_cursor_move {
            area = area.on_move(on_move);
        }
        if let Some(message) = self.on_background_release {
            area = area.on_release(message);
        }
        area.into()
    }

    fn build_row(
        &self,
        context: &TreeRowContext<'a>,
        id: &NodeId,
    ) -> Element<'a, Message> {
        let content = wrap_mouse_area(
            (self.render_row)(context),
            self.on_press.as_deref(),
            self.on_release.as_deref(),
            self.on_hover.as_deref(),
            id,
        );

        let mut row = Row::new().spacing(0.0);

        let indent = context.entry.depth as f32 * self.indent_width;
        if indent > 0.0 {
            row = row.push(Space::new().width(Length::Fixed(indent)));
        }

        if self.toggle_width > 0.0 || self.toggle_content.is_some() {
            row = row.push(self.build_toggle_slot(context, id));
        }

        row = row.push(content);

        let row = container(row)
            .width(Length::Fill)
            .height(Length::Fixed(self.layout.row_height))
            .align_y(alignment::Vertical::Center);

        match self.row_style {
            Some(ref row_style) => {
                let style = row_style(context);
                row.style(move |_| style).into()
            },
            None => row.into(),
        }
    }

    fn build_toggle_slot(
        &self,
        context: &TreeRowContext<'a>,
        id: &NodeId,
    ) -> Element<'a, Message> {
        let content = self
            .toggle_content
            .as_ref()
            .map(|toggle| toggle(context))
            .unwrap_or_else(|| Space::new().into());

        let content: Element<'a, Message> = container(content)
            .width(Length::Fixed(self.toggle_width))
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into();

        let on_toggle = self
            .on_toggle_folder
            .as_deref()
            .filter(|_| context.entry.node.is_folder());

        wrap_mouse_area(content, on_toggle, None, self.on_hover.as_deref(), id)
    }
}

fn wrap_mouse_area<'a, Message: Clone + 'a>(
    element: Element<'a, Message>,
    on_press: Option<&(dyn Fn(NodeId) -> Message + 'a)>,
    on_release: Option<&(dyn Fn(NodeId) -> Message + 'a)>,
    on_hover: Option<&(dyn Fn(Option<NodeId>) -> Message + 'a)>,
    id: &NodeId,
) -> Element<'a, Message> {
    if on_press.is_none() && on_release.is_none() && on_hover.is_none() {
        return element;
    }

    let mut area = mouse_area(element);

    if let Some(on_press) = on_press {
        area = area.on_press(on_press(id.clone()));
    }

    if let Some(on_release) = on_release {
        area = area.on_release(on_release(id.clone()));
    }

    if let Some(on_hover) = on_hover {
        area = area
            .on_enter(on_hover(Some(id.clone())))
            .on_exit(on_hover(None));
    }

    area.interaction(mouse::Interaction::Pointer).into()
}
