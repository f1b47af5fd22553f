//! Drag-and-drop tree widget for [`iced`], driven by [`kreme_tree`].
//!
//! This crate only deals with pixels and pointer events:
//! - [`TreeView`] renders the visible rows of a snapshot with a fixed row
//!   height, indentation and a toggle slot;
//! - [`RowLayout`] maps pointer positions to rows and [`RowBounds`];
//! - [`DragSession`] follows one press-move-release gesture, computes the
//!   [`DropHint`] to highlight and hands the final drop to a
//!   [`TreeStore`](kreme_tree::TreeStore).
//!
//! The recommended flow:
//! 1. keep a [`TreeStore`](kreme_tree::TreeStore) and an optional
//!    [`DragSession`] in your app state;
//! 2. start a session from [`TreeView::on_press`];
//! 3. feed [`TreeView::on_cursor_move`] positions into
//!    [`DragSession::cursor_moved`] and pass the hint back through
//!    [`TreeView::drop_hint`];
//! 4. on release call [`DragSession::finish`].
//!
//! See `examples/tree_dnd.rs` for a complete runnable example.
//!
//! [`RowBounds`]: kreme_tree::RowBounds

mod drag;
mod layout;
mod view;

pub use drag::{DRAG_THRESHOLD, DragSession, DropHint};
pub use layout::{RowHit, RowLayout};
pub use view::{TreeRowContext, TreeView};
