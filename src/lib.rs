//! Scratch & Laugh: a scratch card hiding a programming joke.
//!
//! The card state machine (`card`) only talks to its collaborators through
//! traits: [`surface::ScratchSurface`], [`joke::JokeSource`],
//! [`toast::Notifier`] and [`fx::Celebrate`]. The binary wires in the minifb
//! window, the reqwest JokeAPI client, the toast stack and the confetti.

pub mod app;
pub mod card;
pub mod config;
pub mod draw;
pub mod error;
pub mod fx;
pub mod input;
pub mod joke;
pub mod logging;
pub mod reveal;
pub mod surface;
pub mod toast;
pub mod types;
