//! Iron Claw Beast: a three-phase boss encounter.
//!
//! `boss` is the engine-free state machine; `arena` hosts it in Bevy;
//! `content` loads its tuning; `diver` is the player mech that fights it.

pub mod arena;
pub mod boss;
pub mod content;
pub mod diver;
