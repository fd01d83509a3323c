//! Inline quantity editing for the whole grid.
//!
//! One `GridEditState` serves every cell. The sum type is the single-writer
//! lock: while any cell is in `Editing` or `Saving`, no other cell may begin
//! an edit. The per-target in-flight marker is a separate mechanism; it only
//! drives the spinner on the cell whose save request is outstanding.
//!
//! Every transition funnels through [`GridEditState::apply`], so the
//! lock-release property (every save-success, save-failure or cancel ends
//! unlocked) is enforced in one place and brute-force tested below.

use contracts::domain::product::EditTarget;
use contracts::shared::quantity::{validate_quantity, QuantityError};

#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Idle,
    Editing {
        target: EditTarget,
        staged: String,
        error: Option<QuantityError>,
    },
    Saving {
        target: EditTarget,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// Enter Editing with the current quantity pre-staged. Ignored while the
    /// grid is locked by another cell.
    Begin { target: EditTarget, initial: String },
    /// A keystroke in the staged buffer; revalidated on every input.
    Input(String),
    /// Explicit cancel button or Escape. No network call.
    Cancel,
    /// Enter key, Save button or blur. Validates; an invalid staged value
    /// keeps the editor open with the error flag set.
    Save,
    SaveSucceeded,
    SaveFailed,
}

/// Command the component must execute after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEffect {
    IssueSave { target: EditTarget, quantity: i64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridEditState {
    pub edit: EditState,
    /// Spinner marker for the cell with an outstanding save. Not the lock.
    pub in_flight: Option<EditTarget>,
}

impl Default for EditState {
    fn default() -> Self {
        EditState::Idle
    }
}

impl GridEditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The global edit lock: gates *starting* an edit anywhere in the grid.
    pub fn locked(&self) -> bool {
        !matches!(self.edit, EditState::Idle)
    }

    pub fn editing_target(&self) -> Option<&EditTarget> {
        match &self.edit {
            EditState::Editing { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_in_flight(&self, target: &EditTarget) -> bool {
        self.in_flight.as_ref() == Some(target)
    }

    pub fn apply(&mut self, event: EditEvent) -> Option<EditEffect> {
        match event {
            EditEvent::Begin { target, initial } => {
                if self.locked() {
                    return None;
                }
                let error = validate_quantity(&initial).err();
                self.edit = EditState::Editing {
                    target,
                    staged: initial,
                    error,
                };
                None
            }
            EditEvent::Input(value) => {
                if let EditState::Editing { target, .. } = &self.edit {
                    let error = validate_quantity(&value).err();
                    self.edit = EditState::Editing {
                        target: target.clone(),
                        staged: value,
                        error,
                    };
                }
                None
            }
            EditEvent::Cancel => {
                // Only an open editor can cancel; a submitted save cannot be
                // aborted.
                if matches!(self.edit, EditState::Editing { .. }) {
                    self.edit = EditState::Idle;
                }
                None
            }
            EditEvent::Save => {
                let EditState::Editing { target, staged, .. } = &self.edit else {
                    return None;
                };
                match validate_quantity(staged) {
                    Ok(quantity) => {
                        let target = target.clone();
                        self.in_flight = Some(target.clone());
                        self.edit = EditState::Saving {
                            target: target.clone(),
                        };
                        Some(EditEffect::IssueSave { target, quantity })
                    }
                    Err(error) => {
                        self.edit = EditState::Editing {
                            target: target.clone(),
                            staged: staged.clone(),
                            error: Some(error),
                        };
                        None
                    }
                }
            }
            EditEvent::SaveSucceeded | EditEvent::SaveFailed => {
                // Both outcomes release the lock; failure leaves the row to
                // re-render from the last fetched quantity.
                if matches!(self.edit, EditState::Saving { .. }) {
                    self.edit = EditState::Idle;
                }
                self.in_flight = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_a() -> EditTarget {
        EditTarget::variant("p1", 0)
    }

    fn target_b() -> EditTarget {
        EditTarget::product("p2")
    }

    #[test]
    fn begin_edits_and_stages_initial_value() {
        let mut grid = GridEditState::new();
        assert!(!grid.locked());
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        assert!(grid.locked());
        assert_eq!(grid.editing_target(), Some(&target_a()));
    }

    #[test]
    fn single_editor_invariant() {
        let mut grid = GridEditState::new();
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        // a second cell cannot enter Editing while the first holds the lock
        grid.apply(EditEvent::Begin {
            target: target_b(),
            initial: "9".into(),
        });
        assert_eq!(grid.editing_target(), Some(&target_a()));

        // nor while a save is outstanding
        grid.apply(EditEvent::Save);
        grid.apply(EditEvent::Begin {
            target: target_b(),
            initial: "9".into(),
        });
        assert!(matches!(grid.edit, EditState::Saving { .. }));
    }

    #[test]
    fn invalid_staged_value_blocks_save_and_keeps_editor_open() {
        let mut grid = GridEditState::new();
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        grid.apply(EditEvent::Input("abc".into()));
        let effect = grid.apply(EditEvent::Save);
        assert_eq!(effect, None);
        match &grid.edit {
            EditState::Editing { staged, error, .. } => {
                assert_eq!(staged, "abc");
                assert_eq!(*error, Some(QuantityError::NotANumber));
            }
            other => panic!("expected Editing, got {other:?}"),
        }
        assert_eq!(grid.in_flight, None);
    }

    #[test]
    fn staged_zero_saves_as_zero() {
        // Editing to "0" and saving immediately issues an update with 0;
        // the keystroke and save checks share one rule.
        let mut grid = GridEditState::new();
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        grid.apply(EditEvent::Input("0".into()));
        match &grid.edit {
            EditState::Editing { error, .. } => assert_eq!(*error, None),
            other => panic!("expected Editing, got {other:?}"),
        }
        let effect = grid.apply(EditEvent::Save);
        assert_eq!(
            effect,
            Some(EditEffect::IssueSave {
                target: target_a(),
                quantity: 0
            })
        );
    }

    #[test]
    fn cancel_discards_and_unlocks_without_effect() {
        let mut grid = GridEditState::new();
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        grid.apply(EditEvent::Input("7".into()));
        assert_eq!(grid.apply(EditEvent::Cancel), None);
        assert!(!grid.locked());
        assert_eq!(grid.in_flight, None);
    }

    #[test]
    fn in_flight_marker_tracks_only_the_saving_cell() {
        let mut grid = GridEditState::new();
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        assert!(!grid.is_in_flight(&target_a()));
        grid.apply(EditEvent::Save);
        assert!(grid.is_in_flight(&target_a()));
        assert!(!grid.is_in_flight(&target_b()));
        grid.apply(EditEvent::SaveFailed);
        assert!(!grid.is_in_flight(&target_a()));
    }

    #[test]
    fn save_failure_releases_lock_for_other_cells() {
        let mut grid = GridEditState::new();
        grid.apply(EditEvent::Begin {
            target: target_a(),
            initial: "5".into(),
        });
        grid.apply(EditEvent::Save);
        grid.apply(EditEvent::SaveFailed);
        assert!(!grid.locked());

        // the user can now retry a different cell
        grid.apply(EditEvent::Begin {
            target: target_b(),
            initial: "9".into(),
        });
        assert_eq!(grid.editing_target(), Some(&target_b()));
    }

    /// Lock-release totality, brute-forced: over every event sequence up to
    /// length 5, completing events always leave the grid unlocked, and the
    /// in-flight marker only ever exists during `Saving`.
    #[test]
    fn lock_release_totality() {
        fn alphabet() -> Vec<EditEvent> {
            vec![
                EditEvent::Begin {
                    target: target_a(),
                    initial: "5".into(),
                },
                EditEvent::Input("0".into()),
                EditEvent::Input("x".into()),
                EditEvent::Cancel,
                EditEvent::Save,
                EditEvent::SaveSucceeded,
                EditEvent::SaveFailed,
            ]
        }

        fn explore(grid: GridEditState, depth: usize) {
            if depth == 0 {
                return;
            }
            for event in alphabet() {
                let mut next = grid.clone();
                let was_editing = matches!(next.edit, EditState::Editing { .. });
                next.apply(event.clone());

                match event {
                    EditEvent::SaveSucceeded | EditEvent::SaveFailed => {
                        assert!(!next.locked(), "save completion left the grid locked");
                        assert_eq!(next.in_flight, None);
                    }
                    EditEvent::Cancel if was_editing => {
                        assert!(!next.locked(), "cancel left the grid locked");
                    }
                    _ => {}
                }
                if next.in_flight.is_some() {
                    assert!(
                        matches!(next.edit, EditState::Saving { .. }),
                        "in-flight marker outside Saving"
                    );
                }
                explore(next, depth - 1);
            }
        }

        explore(GridEditState::new(), 5);
    }
}
