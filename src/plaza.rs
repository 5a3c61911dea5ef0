use crate::core::{Event, LoopCmd, PlazaState, Tick};
use crate::events::{self, Listener};
use crate::frame::{FrameClock, FrameLoop};
use crate::render::{self, AvatarNodes};
use crate::ui::Controls;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

#[derive(Clone, Copy)]
enum LoopKind {
    Easing,
    Depth,
    Parallax,
}

/// The mounted plaza: state, DOM nodes, frame loops and live listeners.
///
/// All input funnels through [`Plaza::dispatch`]; frame loops tick the state
/// through the same reducer. Loops and listeners hold `Weak` references, so
/// [`Plaza::teardown`] plus dropping the last `Rc` frees everything.
pub struct Plaza {
    pub state: RefCell<PlazaState>,
    pub(crate) controls: Controls,
    nodes: Vec<AvatarNodes>,
    easing: FrameLoop,
    depth: FrameLoop,
    parallax: FrameLoop,
    easing_clock: FrameClock,
    parallax_clock: FrameClock,
    listeners: RefCell<Vec<Listener>>,
    scroll_listeners: RefCell<Option<Vec<Listener>>>,
}

impl Plaza {
    pub fn mount(
        document: &web::Document,
        container: &web::HtmlElement,
        state: PlazaState,
    ) -> anyhow::Result<Rc<Self>> {
        let nodes = render::mount(document, container, &state)?;
        let controls = Controls::build(document, &state.catalog)?;

        let plaza = Rc::new_cyclic(|weak: &Weak<Plaza>| Plaza {
            state: RefCell::new(state),
            controls,
            nodes,
            easing: frame_loop("easing", weak, LoopKind::Easing),
            depth: frame_loop("depth", weak, LoopKind::Depth),
            parallax: frame_loop("parallax", weak, LoopKind::Parallax),
            easing_clock: FrameClock::default(),
            parallax_clock: FrameClock::default(),
            listeners: RefCell::new(Vec::new()),
            scroll_listeners: RefCell::new(None),
        });

        let mut listeners = crate::ui::wire(&plaza);
        listeners.extend(events::pointer::wire_avatars(&plaza, &plaza.nodes));
        listeners.extend(events::pointer::wire_parallax(&plaza));
        listeners.extend(events::orientation::wire_first_touch(&plaza));
        listeners.extend(events::wire_resize(&plaza));
        plaza.listeners.borrow_mut().extend(listeners);

        plaza.sync_scroll_listeners();
        plaza.refresh_controls();
        plaza.draw();
        Ok(plaza)
    }

    /// Apply one event, schedule loops as requested, and redraw.
    pub fn dispatch(self: &Rc<Self>, event: Event) {
        let refresh = matches!(
            event,
            Event::FilterChanged(_)
                | Event::BasketChanged(_)
                | Event::DisplayCountChanged(_)
                | Event::ViewportChanged(_)
        );
        let t = self.state.borrow_mut().apply(event);
        self.run(LoopKind::Easing, t.easing);
        self.run(LoopKind::Depth, t.depth);
        self.run(LoopKind::Parallax, t.parallax);
        if refresh {
            self.sync_scroll_listeners();
            self.refresh_controls();
        }
        self.draw();
    }

    pub fn keep_listener(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Cancel pending frames, drop every listener and remove the avatar nodes.
    pub fn teardown(&self) {
        self.easing.stop();
        self.depth.stop();
        self.parallax.stop();
        self.listeners.borrow_mut().clear();
        *self.scroll_listeners.borrow_mut() = None;
        render::unmount(&self.nodes);
        log::info!("[plaza] unmounted");
    }

    fn parts(&self, kind: LoopKind) -> (&FrameLoop, Option<&FrameClock>) {
        match kind {
            LoopKind::Easing => (&self.easing, Some(&self.easing_clock)),
            LoopKind::Depth => (&self.depth, None),
            LoopKind::Parallax => (&self.parallax, Some(&self.parallax_clock)),
        }
    }

    fn run(&self, kind: LoopKind, cmd: LoopCmd) {
        let (frame_loop, clock) = self.parts(kind);
        match cmd {
            LoopCmd::Keep => {}
            LoopCmd::Start => frame_loop.start(),
            LoopCmd::Stop => {
                frame_loop.stop();
                if let Some(c) = clock {
                    c.reset();
                }
            }
        }
    }

    /// One frame of `kind`; returns whether the loop wants another frame.
    fn tick(&self, kind: LoopKind) -> bool {
        let (_, clock) = self.parts(kind);
        let dt_frames = clock.map_or(1.0, FrameClock::dt_frames);
        let tick = match kind {
            LoopKind::Easing => Tick::Easing { dt_frames },
            LoopKind::Depth => Tick::Depth,
            LoopKind::Parallax => Tick::Parallax { dt_frames },
        };
        let t = self.state.borrow_mut().apply(Event::Tick(tick));
        let cmd = match kind {
            LoopKind::Easing => t.easing,
            LoopKind::Depth => t.depth,
            LoopKind::Parallax => t.parallax,
        };
        self.draw();
        let running = cmd != LoopCmd::Stop;
        if !running {
            if let Some(c) = clock {
                c.reset();
            }
        }
        running
    }

    /// Depth-scroll input listeners exist only while no filter is active.
    fn sync_scroll_listeners(self: &Rc<Self>) {
        let filtered = self.state.borrow().has_filter();
        let attached = self.scroll_listeners.borrow().is_some();
        if filtered && attached {
            *self.scroll_listeners.borrow_mut() = None;
            log::info!("[input] depth scroll detached");
        } else if !filtered && !attached {
            let listeners = events::scroll::wire(self);
            *self.scroll_listeners.borrow_mut() = Some(listeners);
            log::info!("[input] depth scroll attached");
        }
    }

    fn refresh_controls(&self) {
        self.controls.refresh(&self.state.borrow());
    }

    fn draw(&self) {
        render::draw(&self.nodes, &self.state.borrow());
    }
}

fn frame_loop(name: &'static str, weak: &Weak<Plaza>, kind: LoopKind) -> FrameLoop {
    let weak = weak.clone();
    FrameLoop::new(name, move || weak.upgrade().is_some_and(|p| p.tick(kind)))
}
