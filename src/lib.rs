//! Simulation core for a two-player platform fighter played on top of a giant
//! keyboard. Everything in here is frontend-agnostic: the terminal binary only
//! feeds `InputSnapshot`s in and reads entity state back out.

pub mod bubble;
pub mod collision;
pub mod combatant;
pub mod controls;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod level;
pub mod platform;
pub mod projectile;
pub mod settings;
pub mod status;
