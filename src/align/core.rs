use serde::{Deserialize, Serialize};

use crate::tree::{NodeHandle, Surface};

/// Horizontal placement policy for content inside a column.
///
/// The active strategy is part of the render pass state: it is changed by the
/// `left`/`right`/`center` layout functions and read by every subsequent
/// content placement until changed again. It does not reset between rows or
/// columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Wrap `container` in a horizontal slot so content floats per `alignment`,
/// returning the inner column the content should be added to.
///
/// Flexible spacers do the floating: trailing spacer hugs content to the
/// start, leading spacer hugs it to the end, one on each side centers it.
pub fn wrap(surface: &mut dyn Surface, container: NodeHandle, alignment: Alignment) -> NodeHandle {
    let slot = surface.add_hbox(container);
    match alignment {
        Alignment::Left => {
            let inner = surface.add_column(slot, None);
            surface.add_spacer(slot, None);
            inner
        }
        Alignment::Right => {
            surface.add_spacer(slot, None);
            surface.add_column(slot, None)
        }
        Alignment::Center => {
            surface.add_spacer(slot, None);
            let inner = surface.add_column(slot, None);
            surface.add_spacer(slot, None);
            inner
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ContainerTree, NodeKind};

    fn slot_kinds(alignment: Alignment) -> Vec<NodeKind> {
        let mut tree = ContainerTree::new();
        let row = tree.add_row(tree.root(), None);
        let column = tree.add_column(row, None);
        let inner = wrap(&mut tree, column, alignment);
        tree.add_text(inner, "x");

        let slot = tree.children(column)[0];
        assert_eq!(tree.kind(slot), &NodeKind::HBox);
        tree.children(slot)
            .iter()
            .map(|h| tree.kind(*h).clone())
            .collect()
    }

    #[test]
    fn left_places_trailing_spacer() {
        assert_eq!(
            slot_kinds(Alignment::Left),
            vec![
                NodeKind::Column { width: None },
                NodeKind::Spacer { size: None },
            ]
        );
    }

    #[test]
    fn right_places_leading_spacer() {
        assert_eq!(
            slot_kinds(Alignment::Right),
            vec![
                NodeKind::Spacer { size: None },
                NodeKind::Column { width: None },
            ]
        );
    }

    #[test]
    fn center_places_both_spacers() {
        assert_eq!(
            slot_kinds(Alignment::Center),
            vec![
                NodeKind::Spacer { size: None },
                NodeKind::Column { width: None },
                NodeKind::Spacer { size: None },
            ]
        );
    }
}
