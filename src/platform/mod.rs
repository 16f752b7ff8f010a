//! Platform abstraction layer
//!
//! The game loop is a cancellable repeating frame task. On the web it is
//! backed by `requestAnimationFrame`; natively (headless runs, tests) the
//! caller drives frames by hand.

/// A cancellable "call me next frame" request
///
/// At most one request is outstanding. `request_frame` while one is pending
/// is a no-op, so re-entrant lifecycle calls can never start a second loop.
pub trait Scheduler {
    /// Ask for the next frame callback
    fn request_frame(&mut self);
    /// Drop the outstanding request, if any
    fn cancel(&mut self);
    /// The outstanding request has fired
    fn frame_started(&mut self);
    fn is_pending(&self) -> bool;
}

/// Scheduler whose frames are driven explicitly by the owner
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: bool,
    /// Accepted requests so far
    pub requests: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) {
        if !self.pending {
            self.pending = true;
            self.requests += 1;
        }
    }

    fn cancel(&mut self) {
        self.pending = false;
    }

    fn frame_started(&mut self) {
        self.pending = false;
    }

    fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{AnimationFrameScheduler, FrameCallback};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::Scheduler;

    /// Shared slot for the frame callback
    ///
    /// Filled after the game exists, since the callback captures the game.
    pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` handle management
    pub struct AnimationFrameScheduler {
        window: web_sys::Window,
        callback: FrameCallback,
        handle: Option<i32>,
    }

    impl AnimationFrameScheduler {
        pub fn new(window: web_sys::Window, callback: FrameCallback) -> Self {
            Self {
                window,
                callback,
                handle: None,
            }
        }
    }

    impl Scheduler for AnimationFrameScheduler {
        fn request_frame(&mut self) {
            if self.handle.is_some() {
                return;
            }
            let callback = self.callback.borrow();
            let Some(callback) = callback.as_ref() else {
                log::warn!("Frame requested before the callback was installed");
                return;
            };
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(handle) => self.handle = Some(handle),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }

        fn cancel(&mut self) {
            if let Some(handle) = self.handle.take() {
                let _ = self.window.cancel_animation_frame(handle);
            }
        }

        fn frame_started(&mut self) {
            self.handle = None;
        }

        fn is_pending(&self) -> bool {
            self.handle.is_some()
        }
    }
}
