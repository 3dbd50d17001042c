//! Piles and the board that owns them.
//!
//! ## Key Types
//!
//! - `PileId`: Stable pile address (stock, waste, column-N, foundation-suit)
//! - `Pile`: Ordered card sequence, top = last
//! - `Board`: All thirteen piles plus card-location tracking
//! - `Layout`: Hand-built pile contents for setting up positions

pub mod board;
pub mod pile;

pub use board::{Board, Draw, Layout};
pub use pile::{Pile, PileId, Run};
