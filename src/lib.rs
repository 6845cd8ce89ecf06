//! Real-time simulation core of a snake arcade game: a grid-stepped snake
//! eats apples and power items, fires dart volleys and shockwaves, dodges
//! bombs and chasing enemies, and finally fights a raging boss.
//!
//! The library never touches a clock, a terminal or a speaker.  Frame
//! functions in [`compute`] receive the current time and an RNG and return
//! the next [`entities::GameState`], including the sound requests the frame
//! produced.

pub mod audio;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod registry;

pub use error::{GameError, Result};
