//! Klondike move rules.
//!
//! The predicates here decide whether a card or run may move; they do
//! not mutate anything. `game::Game` consults them before touching the
//! board.

pub mod validator;

pub use validator::{can_stack_on_foundation, can_stack_on_tableau, is_different_color, is_movable_run};
