//! Stack-based view navigation
//!
//! The navigator owns an ordered stack of frames; the last frame is the
//! one currently visible. Frames are costly to keep alive (they hold view
//! state), so the stack destroys a frame exactly once, on the transition
//! that retires it. The bottom frame is a permanent landing view and is
//! never popped.

use std::collections::VecDeque;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::app::context::AppContext;
use crate::ui::event::UiEvent;
use crate::ui::view::PageView;

/// Default lifetime of a transient notice, matching the reference app.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Popping the base frame is a programmer error: callers must keep a
/// minimum of one permanent landing frame on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("navigation stack would become empty")]
pub struct EmptyStackError;

/// Transient, auto-dismissing notice. Display is the UI layer's job; the
/// navigator only queues them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: TOAST_DURATION,
        }
    }
}

/// One navigable view with its lifecycle hooks
///
/// `handle` never touches the stack directly; it records requests on the
/// collector, which the navigator applies after the handler returns.
pub trait Frame {
    /// Short name for logs and the rendering collaborator.
    fn title(&self) -> &str;

    /// The frame became the visible top of the stack.
    fn on_show(&mut self, _ctx: &mut AppContext) {}

    /// Another frame was pushed on top of this one.
    fn on_hide(&mut self, _ctx: &mut AppContext) {}

    /// The frame was retired from the stack. Runs exactly once.
    fn on_destroy(&mut self, _ctx: &mut AppContext) {}

    /// Render-model for the external UI layer.
    fn view(&self, ctx: &AppContext) -> PageView;

    /// Reacts to one user input event.
    fn handle(&mut self, ctx: &mut AppContext, event: UiEvent, nav: &mut NavRequests);
}

enum NavRequest {
    Push(Box<dyn Frame>),
    Back,
    Reset,
    Notify(Toast),
}

/// Navigation requests collected while a frame handles an event
#[derive(Default)]
pub struct NavRequests {
    requests: Vec<NavRequest>,
}

impl NavRequests {
    pub fn push(&mut self, frame: Box<dyn Frame>) {
        self.requests.push(NavRequest::Push(frame));
    }

    pub fn back(&mut self) {
        self.requests.push(NavRequest::Back);
    }

    pub fn reset(&mut self) {
        self.requests.push(NavRequest::Reset);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.requests.push(NavRequest::Notify(Toast::new(message)));
    }

    pub fn notify_for(&mut self, message: impl Into<String>, duration: Duration) {
        self.requests.push(NavRequest::Notify(Toast {
            message: message.into(),
            duration,
        }));
    }
}

/// The view router: push/back/reset semantics over a stack of frames
pub struct Navigator {
    stack: Vec<Box<dyn Frame>>,
    toasts: VecDeque<Toast>,
    home: Box<dyn Fn() -> Box<dyn Frame>>,
}

impl Navigator {
    /// Builds the navigator with its permanent landing frame, produced by
    /// `home`. The same factory rebuilds the landing frame on `reset`.
    pub fn new(ctx: &mut AppContext, home: impl Fn() -> Box<dyn Frame> + 'static) -> Self {
        let mut root = home();
        root.on_show(ctx);
        Self {
            stack: vec![root],
            toasts: VecDeque::new(),
            home: Box::new(home),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_mut(&mut self) -> &mut Box<dyn Frame> {
        self.stack.last_mut().expect("stack is never empty")
    }

    pub fn top(&self) -> &dyn Frame {
        self.stack.last().expect("stack is never empty").as_ref()
    }

    /// Render-model of the currently visible frame.
    pub fn view(&self, ctx: &AppContext) -> PageView {
        self.top().view(ctx)
    }

    /// Hides the current top, appends `frame`, and shows it.
    pub fn push(&mut self, ctx: &mut AppContext, mut frame: Box<dyn Frame>) {
        debug!(from = self.top().title(), to = frame.title(), "push");
        self.top_mut().on_hide(ctx);
        frame.on_show(ctx);
        self.stack.push(frame);
    }

    /// Pops and destroys the top frame, then shows the new top. Fails if
    /// the pop would empty the stack.
    pub fn back(&mut self, ctx: &mut AppContext) -> Result<(), EmptyStackError> {
        if self.stack.len() <= 1 {
            return Err(EmptyStackError);
        }
        let mut retired = self.stack.pop().expect("len checked above");
        debug!(retired = retired.title(), "back");
        retired.on_destroy(ctx);
        self.top_mut().on_show(ctx);
        Ok(())
    }

    /// Destroys every frame top-down and pushes a single fresh landing
    /// frame. Used to recover to a known-good state after terminal
    /// events.
    pub fn reset(&mut self, ctx: &mut AppContext) {
        debug!(depth = self.stack.len(), "reset to landing");
        while let Some(mut frame) = self.stack.pop() {
            frame.on_destroy(ctx);
        }
        let mut root = (self.home)();
        root.on_show(ctx);
        self.stack.push(root);
    }

    /// Queues a transient notice without altering the stack.
    pub fn notify(&mut self, message: impl Into<String>, duration: Duration) {
        self.toasts.push_back(Toast {
            message: message.into(),
            duration,
        });
    }

    /// Drains the queued notices for the UI layer to display.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain(..).collect()
    }

    /// Delivers one input event to the top frame, then applies whatever
    /// navigation it requested.
    pub fn dispatch(&mut self, ctx: &mut AppContext, event: UiEvent) -> Result<(), EmptyStackError> {
        let mut nav = NavRequests::default();
        self.top_mut().handle(ctx, event, &mut nav);
        for request in nav.requests {
            match request {
                NavRequest::Push(frame) => self.push(ctx, frame),
                NavRequest::Back => self.back(ctx)?,
                NavRequest::Reset => self.reset(ctx),
                NavRequest::Notify(toast) => self.toasts.push_back(toast),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::assets::AssetCache;
    use crate::domain::catalog::Catalog;
    use crate::domain::tables::TableRegistry;
    use crate::ui::view::{BackgroundState, PageBody};

    fn test_ctx() -> AppContext {
        AppContext::new(
            Catalog::default(),
            TableRegistry::with_seed(2, 1),
            AssetCache::default(),
        )
    }

    /// Frame that counts its lifecycle transitions.
    struct ProbeFrame {
        name: &'static str,
        shows: Rc<Cell<u32>>,
        hides: Rc<Cell<u32>>,
        destroys: Rc<Cell<u32>>,
    }

    impl ProbeFrame {
        fn new(name: &'static str) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>, Rc<Cell<u32>>) {
            let shows = Rc::new(Cell::new(0));
            let hides = Rc::new(Cell::new(0));
            let destroys = Rc::new(Cell::new(0));
            let frame = Self {
                name,
                shows: Rc::clone(&shows),
                hides: Rc::clone(&hides),
                destroys: Rc::clone(&destroys),
            };
            (frame, shows, hides, destroys)
        }
    }

    impl Frame for ProbeFrame {
        fn title(&self) -> &str {
            self.name
        }

        fn on_show(&mut self, _ctx: &mut AppContext) {
            self.shows.set(self.shows.get() + 1);
        }

        fn on_hide(&mut self, _ctx: &mut AppContext) {
            self.hides.set(self.hides.get() + 1);
        }

        fn on_destroy(&mut self, _ctx: &mut AppContext) {
            self.destroys.set(self.destroys.get() + 1);
        }

        fn view(&self, _ctx: &AppContext) -> PageView {
            PageView {
                title: self.name.to_string(),
                background: BackgroundState::Unavailable,
                body: PageBody::Landing,
            }
        }

        fn handle(&mut self, _ctx: &mut AppContext, _event: UiEvent, _nav: &mut NavRequests) {}
    }

    fn base_frame() -> Box<dyn Frame> {
        Box::new(ProbeFrame::new("base").0)
    }

    #[test]
    fn push_then_back_restores_previous_frame() {
        let mut ctx = test_ctx();
        let mut nav = Navigator::new(&mut ctx, base_frame);

        let (a, a_shows, a_hides, a_destroys) = ProbeFrame::new("a");
        let (b, _, _, b_destroys) = ProbeFrame::new("b");

        nav.push(&mut ctx, Box::new(a));
        nav.push(&mut ctx, Box::new(b));
        assert_eq!(nav.depth(), 3);
        assert_eq!(a_shows.get(), 1);
        assert_eq!(a_hides.get(), 1);

        nav.back(&mut ctx).unwrap();
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.top().title(), "a");
        assert_eq!(b_destroys.get(), 1);
        assert_eq!(a_shows.get(), 2); // shown again after the pop
        assert_eq!(a_destroys.get(), 0);
    }

    #[test]
    fn popping_the_base_frame_fails() {
        let mut ctx = test_ctx();
        let mut nav = Navigator::new(&mut ctx, base_frame);
        assert_eq!(nav.back(&mut ctx), Err(EmptyStackError));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn reset_destroys_everything_and_rebuilds_landing() {
        let mut ctx = test_ctx();
        let mut nav = Navigator::new(&mut ctx, base_frame);

        let (a, _, _, a_destroys) = ProbeFrame::new("a");
        let (b, _, _, b_destroys) = ProbeFrame::new("b");
        nav.push(&mut ctx, Box::new(a));
        nav.push(&mut ctx, Box::new(b));

        nav.reset(&mut ctx);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.top().title(), "base");
        assert_eq!(a_destroys.get(), 1);
        assert_eq!(b_destroys.get(), 1);
    }

    #[test]
    fn reset_of_a_lone_landing_still_yields_one_frame() {
        let mut ctx = test_ctx();
        let mut nav = Navigator::new(&mut ctx, base_frame);
        nav.reset(&mut ctx);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn notify_queues_without_touching_the_stack() {
        let mut ctx = test_ctx();
        let mut nav = Navigator::new(&mut ctx, base_frame);

        nav.notify("meja penuh", TOAST_DURATION);
        assert_eq!(nav.depth(), 1);

        let toasts = nav.take_toasts();
        assert_eq!(toasts, vec![Toast::new("meja penuh")]);
        assert!(nav.take_toasts().is_empty());
    }

    /// Frame whose handler pushes a probe, for dispatch coverage.
    struct PushingFrame;

    impl Frame for PushingFrame {
        fn title(&self) -> &str {
            "pusher"
        }

        fn view(&self, _ctx: &AppContext) -> PageView {
            PageView {
                title: "pusher".into(),
                background: BackgroundState::Unavailable,
                body: PageBody::Landing,
            }
        }

        fn handle(&mut self, _ctx: &mut AppContext, _event: UiEvent, nav: &mut NavRequests) {
            nav.push(Box::new(ProbeFrame::new("pushed").0));
            nav.notify("pushed a frame");
        }
    }

    #[test]
    fn dispatch_applies_requests_after_the_handler() {
        let mut ctx = test_ctx();
        let mut nav = Navigator::new(&mut ctx, || Box::new(PushingFrame));

        nav.dispatch(&mut ctx, UiEvent::Submit).unwrap();
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.top().title(), "pushed");
        assert_eq!(nav.take_toasts().len(), 1);
    }
}
