//! fOS Reveal - Viewport Visibility Transitions
//!
//! Elements fade (and optionally slide) into view once they intersect the
//! viewport. Each animated element gets one [`VisibilityObserverController`]:
//!
//! 1. the host mounts the controller on the element's [`NodeId`](fos_dom::NodeId)
//! 2. the controller acquires one observation resource from an
//!    [`ObservationPlatform`] (usually the [`Compositor`])
//! 3. intersection batches flip a two-state [`VisibilityState`]
//! 4. the host re-renders, writing [`VisibilityObserverController::style`]
//!    onto the element; CSS interpolates between the two snapshots
//!
//! Unmounting (or dropping the controller) releases the resource. Batches
//! that arrive afterwards are ignored.
//!
//! # Example
//! ```rust
//! use std::rc::Rc;
//! use fos_dom::DomTree;
//! use fos_reveal::{Compositor, IntersectionRecord, TransitionConfig, VisibilityObserverController};
//!
//! let mut tree = DomTree::new();
//! let node = tree.append_element(tree.root(), "div").unwrap();
//!
//! let compositor = Rc::new(Compositor::new());
//! let mut controller = VisibilityObserverController::new(TransitionConfig::fade(), compositor.clone());
//! controller.mount(Some(node));
//!
//! let observer = compositor.observer_for(node).unwrap();
//! compositor.deliver(observer, vec![IntersectionRecord::new(node, true)]);
//! compositor.flush();
//!
//! assert!(controller.is_visible());
//! assert_eq!(controller.style().get("opacity"), Some("1"));
//! ```

mod style;
mod config;
mod state;
mod platform;
mod compositor;
mod binding;
mod render;
mod controller;
mod fade_in;

pub use style::{StyleMap, StyleError};
pub use config::{TransitionConfig, ConfigError, DEFAULT_TRANSITION};
pub use state::VisibilityState;
pub use platform::{ObservationPlatform, ObserverId, IntersectionRecord, IntersectionCallback};
pub use compositor::Compositor;
pub use binding::ObservationBinding;
pub use render::RenderQueue;
pub use controller::{VisibilityObserverController, MountOutcome};
pub use fade_in::FadeIn;
