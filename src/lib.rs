//! Avakit composes a stylized animated character at a configurable level of
//! visual detail, for either a vector (2D) or a polygonal (3D) renderer,
//! from one shared description of the character.
//!
//! The interesting machinery is deliberately small and fully deterministic:
//!
//! - [`detail::resolve`] maps a detail level (1–10) to a per-component
//!   feature budget, from hand-tuned literal tables kept independently per
//!   backend but feature-parity-checked against each other.
//! - [`palette::Palette`] derives every secondary shade from the configured
//!   base colors.
//! - [`animation::engine::AnimationTimerEngine`] runs the blink, idle
//!   gesture and manual trigger timer axes plus the talk toggle, clocked
//!   entirely by the host.
//! - [`compose::vector::compose`] and [`compose::polygon::compose`] turn a
//!   configuration and an animation-state snapshot into a serializable
//!   scene description for the external drawing host.
#![forbid(unsafe_code)]

pub mod animation;
pub mod compose;
pub mod config;
pub mod detail;
pub mod foundation;
pub mod palette;
pub mod scene;

pub use animation::engine::{AnimationTimerEngine, EngineTuning};
pub use animation::state::{AnimationState, Gesture, MouthState};
pub use config::Configuration;
pub use detail::{Component, DetailBudget, Feature, resolve};
pub use foundation::core::BackendKind;
pub use foundation::error::{AvakitError, AvakitResult};
pub use palette::{Palette, Rgb8};
pub use scene::mesh::MeshScene;
pub use scene::vector::VectorScene;
