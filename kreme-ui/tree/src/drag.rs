use iced::Point;
use kreme_tree::{
    DragItem, DropSummary, DropTarget, DropZone, FlattenedNode, NodeId,
    TreeStore, ZoneThresholds, classify,
};

use crate::layout::{RowHit, RowLayout};

/// Pointer travel, in pixels, before a press turns into a drag.
pub const DRAG_THRESHOLD: f32 = 4.0;

/// Where the dragged row would land if released now.
#[derive(Debug, Clone, PartialEq)]
pub enum DropHint {
    Row { target: NodeId, zone: DropZone },
    /// Empty space below the rows.
    Background,
}

impl DropHint {
    /// Zone highlighted on `id`, if the hint points at that row.
    pub fn zone_for(&self, id: &NodeId) -> Option<DropZone> {
        match self {
            DropHint::Row { target, zone } if target == id => Some(*zone),
            _ => None,
        }
    }
}

/// One press-move-release gesture on a tree row.
#[derive(Debug, Clone)]
pub struct DragSession {
    item: DragItem,
    origin: Point,
    active: bool,
    target: Option<DropTarget>,
    hint: Option<DropHint>,
}

impl DragSession {
    /// Start tracking a press on `id` at `origin`.
    pub fn press(store: &TreeStore, id: &NodeId, origin: Point) -> Option<Self> {
        let item = DragItem::from_tree(store.nodes(), id)?;
        Some(Self {
            item,
            origin,
            active: false,
            target: None,
            hint: None,
        })
    }

    pub fn item(&self) -> &DragItem {
        &self.item
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn hint(&self) -> Option<&DropHint> {
        self.hint.as_ref()
    }

    /// Track the pointer and refresh the drop hint.
    ///
    /// `rows` must be the rows currently rendered with `layout`.
    pub fn cursor_moved(
        &mut self,
        rows: &[FlattenedNode<'_>],
        layout: &RowLayout,
        zones: ZoneThresholds,
        position: Point,
    ) -> Option<&DropHint> {
        if !self.active {
            let dx = position.x - self.origin.x;
            let dy = position.y - self.origin.y;
            if dx * dx + dy * dy < DRAG_THRESHOLD * DRAG_THRESHOLD {
                return None;
            }
            log::debug!("drag of {} started", self.item.id);
            self.active = true;
        }

        self.target = None;
        self.hint = match layout.hit(position.y, rows.len()) {
            RowHit::Row(visible) => {
                let row = &rows[visible];
                if self.covers(row) {
                    None
                } else {
                    let zone =
                        classify(Some(layout.bounds(visible)), position.y, zones);
                    self.target = Some(DropTarget::from_row(row));
                    Some(DropHint::Row {
                        target: row.node.id().clone(),
                        zone,
                    })
                }
            },
            RowHit::Background => Some(DropHint::Background),
            RowHit::Outside => None,
        };
        self.hint.as_ref()
    }

    /// The dragged row itself or one of its descendants.
    fn covers(&self, row: &FlattenedNode<'_>) -> bool {
        row.node.id() == &self.item.id || row.ancestry.contains(&self.item.id)
    }

    /// Release the pointer and apply the drop, if any.
    ///
    /// Returns `None` for a plain click, a release with no valid target, or a
    /// rejected drop.
    pub fn finish(self, store: &mut TreeStore) -> Option<DropSummary> {
        if !self.active {
            return None;
        }

        match (self.hint, self.target) {
            (Some(DropHint::Row { zone, .. }), Some(target)) => {
                store.drop_item(&self.item, &target, zone)
            },
            (Some(DropHint::Background), _) => {
                store.drop_on_background(&self.item)
            },
            _ => {
                log::debug!("drag of {} abandoned", self.item.id);
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use kreme_tree::{Folder, TreeConfig, TreeNode};

    use super::*;

    fn id(value: i64) -> NodeId {
        NodeId::Int(value)
    }

    fn store() -> TreeStore {
        let nodes = vec![
            TreeNode::Folder(Folder::new(1, "src").open(true).with_children(
                vec![TreeNode::file(2, "main.rs"), TreeNode::file(3, "lib.rs")],
            )),
            TreeNode::folder(4, "docs", vec![]),
        ];
        TreeStore::new(nodes, TreeConfig::default()).unwrap()
    }

    const LAYOUT: RowLayout = RowLayout {
        row_height: 30.0,
        spacing: 0.0,
    };

    fn move_to(
        session: &mut DragSession,
        store: &TreeStore,
        y: f32,
    ) -> Option<DropHint> {
        let rows = store.rows();
        session
            .cursor_moved(&rows, &LAYOUT, store.config().zones, Point::new(5.0, y))
            .cloned()
    }

    #[test]
    fn small_moves_do_not_start_a_drag() {
        let store = store();
        let mut session =
            DragSession::press(&store, &id(2), Point::new(5.0, 40.0)).unwrap();

        assert_eq!(move_to(&mut session, &store, 42.0), None);
        assert!(!session.is_active());
    }

    #[test]
    fn click_without_drag_changes_nothing() {
        let mut store = store();
        let before = store.snapshot();
        let session =
            DragSession::press(&store, &id(2), Point::new(5.0, 40.0)).unwrap();

        assert!(session.finish(&mut store).is_none());
        assert!(std::sync::Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn hint_skips_the_dragged_subtree() {
        let store = store();
        let mut session =
            DragSession::press(&store, &id(1), Point::new(5.0, 10.0)).unwrap();

        assert_eq!(move_to(&mut session, &store, 45.0), None);
        assert!(session.is_active());
        assert_eq!(
            move_to(&mut session, &store, 105.0),
            Some(DropHint::Row {
                target: id(4),
                zone: DropZone::Middle
            })
        );
    }

    #[test]
    fn releasing_on_folder_middle_moves_the_row() {
        let mut store = store();
        let mut session =
            DragSession::press(&store, &id(2), Point::new(5.0, 40.0)).unwrap();
        move_to(&mut session, &store, 105.0);

        let summary = session.finish(&mut store).unwrap();

        assert_eq!(summary.target_parent.id, id(4));
        assert_eq!(store.find(&id(1)).unwrap().children().unwrap().len(), 1);
    }

    #[test]
    fn releasing_below_rows_moves_to_the_end() {
        let mut store = store();
        let mut session =
            DragSession::press(&store, &id(3), Point::new(5.0, 70.0)).unwrap();

        assert_eq!(
            move_to(&mut session, &store, 200.0),
            Some(DropHint::Background)
        );
        session.finish(&mut store).unwrap();

        assert_eq!(store.nodes().last().map(TreeNode::id), Some(&id(3)));
    }

    #[test]
    fn hint_reports_zone_for_its_row_only() {
        let hint = DropHint::Row {
            target: id(4),
            zone: DropZone::Top,
        };

        assert_eq!(hint.zone_for(&id(4)), Some(DropZone::Top));
        assert_eq!(hint.zone_for(&id(1)), None);
        assert_eq!(DropHint::Background.zone_for(&id(4)), None);
    }
}
