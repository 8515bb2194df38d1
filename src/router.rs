//! Client-side navigation without full-page reloads.
//!
//! A `Router` owns an immutable table mapping URL paths to asynchronous
//! markup producers. Navigating (programmatically via [`Router::navigate`] or
//! through browser back/forward) resolves the path against the table,
//! replaces the mount element's contents wholesale with the produced markup,
//! and runs the setup routine registered for the page kind the producer
//! tagged its output with.
//!
//! Two pieces of state guard the render pipeline:
//! - the current path, checked for equality before any producer runs, so a
//!   repeat navigation to the displayed path is a cheap no-op;
//! - a generation counter, bumped on every navigation trigger and re-checked
//!   when a producer settles, so a slow producer from an abandoned navigation
//!   can never overwrite a newer render.
//!
//! A producer failure is caught here, logged, and swallowed: the previously
//! rendered view stays on screen.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};

use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::constants::ROUTE_NOT_FOUND;

/// Which page a producer rendered. The router dispatches setup routines on
/// this tag instead of re-inspecting the markup it just injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Profile,
    Messages,
    Login,
    Register,
    Other,
}

/// What a route producer resolves to: the page tag plus the markup that
/// becomes the mount element's new content.
#[derive(Debug, Clone)]
pub struct PageView {
    pub kind: PageKind,
    pub markup: String,
}

pub type ProducerFuture = Pin<Box<dyn Future<Output = Result<PageView, JsValue>>>>;
pub type Producer = Rc<dyn Fn() -> ProducerFuture>;
pub type SetupFn = Box<dyn Fn(&Rc<Router>)>;

/// Payload pushed onto the history stack for each navigation.
#[derive(Serialize)]
struct NavState {
    path: String,
}

pub struct Router {
    routes: HashMap<String, Producer>,
    setups: RefCell<HashMap<PageKind, SetupFn>>,
    mount: Element,
    current_path: RefCell<String>,
    generation: Cell<u64>,
    // Handle to ourselves for spawned render tasks and setup routines.
    weak_self: RefCell<Weak<Router>>,
}

impl Router {
    /// Build a router over an immutable route table. The table should carry a
    /// `"/404"` entry; unknown paths fall back to it. The mount element is
    /// the router's sole write surface.
    pub fn new(routes: HashMap<String, Producer>, mount: Element) -> Rc<Self> {
        let router = Rc::new(Self {
            routes,
            setups: RefCell::new(HashMap::new()),
            mount,
            current_path: RefCell::new(String::new()),
            generation: Cell::new(0),
            weak_self: RefCell::new(Weak::new()),
        });
        *router.weak_self.borrow_mut() = Rc::downgrade(&router);
        router
    }

    /// Register the setup routine for a page kind. At most one routine runs
    /// per render; kinds without a routine are simply skipped.
    pub fn on_page(&self, kind: PageKind, setup: SetupFn) {
        self.setups.borrow_mut().insert(kind, setup);
    }

    /// Resolve the current location, then keep re-resolving on every
    /// history-navigation (popstate) event.
    pub fn start(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        {
            let router = self.rc().ok_or_else(|| JsValue::from_str("router dropped"))?;
            let on_popstate = Closure::wrap(Box::new(move |_event: web_sys::PopStateEvent| {
                router.handle_location();
            }) as Box<dyn FnMut(_)>);
            window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
            on_popstate.forget();
        }

        self.handle_location();
        Ok(())
    }

    /// Push `path` onto the history stack without reloading, then resolve it.
    /// Re-navigating to the currently displayed path performs no render work.
    pub fn navigate(&self, path: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let state = serde_wasm_bindgen::to_value(&NavState {
                path: path.to_string(),
            })
            .unwrap_or(JsValue::NULL);
            if let Err(e) = history.push_state_with_url(&state, "", Some(path)) {
                web_sys::console::warn_1(&format!("pushState failed for {}: {:?}", path, e).into());
            }
        }
        self.schedule(path.to_string());
    }

    /// The path currently on screen (empty before the first render).
    pub fn current_path(&self) -> String {
        self.current_path.borrow().clone()
    }

    fn rc(&self) -> Option<Rc<Self>> {
        self.weak_self.borrow().upgrade()
    }

    fn handle_location(&self) {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string());
        self.schedule(path);
    }

    fn schedule(&self, path: String) {
        if *self.current_path.borrow() == path {
            return;
        }
        let router = match self.rc() {
            Some(r) => r,
            None => return,
        };
        spawn_local(async move {
            router.resolve(&path).await;
        });
    }

    /// Resolve `path` against the route table and render the result. The
    /// current path is recorded before the producer is awaited, so overlapping
    /// triggers for the same path collapse into one render.
    pub(crate) async fn resolve(&self, path: &str) {
        if *self.current_path.borrow() == path {
            return;
        }
        self.current_path.replace(path.to_string());

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let producer = match self
            .routes
            .get(path)
            .or_else(|| self.routes.get(ROUTE_NOT_FOUND))
        {
            Some(producer) => producer.clone(),
            None => {
                web_sys::console::warn_1(
                    &format!("No route for {} and no {} fallback", path, ROUTE_NOT_FOUND).into(),
                );
                return;
            }
        };

        match producer().await {
            Ok(view) => {
                if self.generation.get() != generation {
                    // A newer navigation started while this producer was in
                    // flight; its result is stale.
                    return;
                }
                self.mount.set_inner_html(&view.markup);
                if let Some(router) = self.rc() {
                    if let Some(setup) = self.setups.borrow().get(&view.kind) {
                        setup(&router);
                    }
                }
            }
            Err(e) => {
                // The previous view stays on screen; producers that want an
                // error screen resolve to one instead of rejecting.
                web_sys::console::error_1(
                    &format!("Route handling error for {}: {:?}", path, e).into(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount() -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        document.create_element("div").unwrap()
    }

    fn static_route(kind: PageKind, markup: &str) -> Producer {
        let markup = markup.to_string();
        Rc::new(move || -> ProducerFuture {
            let view = PageView {
                kind,
                markup: markup.clone(),
            };
            Box::pin(async move { Ok(view) })
        })
    }

    fn counting_route(kind: PageKind, markup: &str, calls: Rc<Cell<u32>>) -> Producer {
        let markup = markup.to_string();
        Rc::new(move || -> ProducerFuture {
            calls.set(calls.get() + 1);
            let view = PageView {
                kind,
                markup: markup.clone(),
            };
            Box::pin(async move { Ok(view) })
        })
    }

    fn failing_route() -> Producer {
        Rc::new(|| -> ProducerFuture {
            Box::pin(async { Err(JsValue::from_str("backend unreachable")) })
        })
    }

    fn slow_route(kind: PageKind, markup: &str, delay_ms: u32) -> Producer {
        let markup = markup.to_string();
        Rc::new(move || -> ProducerFuture {
            let view = PageView {
                kind,
                markup: markup.clone(),
            };
            Box::pin(async move {
                TimeoutFuture::new(delay_ms).await;
                Ok(view)
            })
        })
    }

    fn table(entries: Vec<(&str, Producer)>) -> HashMap<String, Producer> {
        entries
            .into_iter()
            .map(|(path, producer)| (path.to_string(), producer))
            .collect()
    }

    #[wasm_bindgen_test]
    async fn declared_path_renders_producer_markup() {
        let mount = mount();
        let router = Router::new(
            table(vec![
                ("/a", static_route(PageKind::Other, "A")),
                (ROUTE_NOT_FOUND, static_route(PageKind::Other, "NF")),
            ]),
            mount.clone(),
        );

        router.resolve("/a").await;
        assert_eq!(mount.inner_html(), "A");
        assert_eq!(router.current_path(), "/a");
    }

    #[wasm_bindgen_test]
    async fn unknown_path_uses_not_found_producer() {
        let mount = mount();
        let router = Router::new(
            table(vec![
                ("/a", static_route(PageKind::Other, "A")),
                (ROUTE_NOT_FOUND, static_route(PageKind::Other, "NF")),
            ]),
            mount.clone(),
        );

        router.resolve("/nope").await;
        assert_eq!(mount.inner_html(), "NF");
    }

    #[wasm_bindgen_test]
    async fn repeat_navigation_to_current_path_is_a_no_op() {
        let mount = mount();
        let calls = Rc::new(Cell::new(0));
        let router = Router::new(
            table(vec![("/a", counting_route(PageKind::Other, "A", calls.clone()))]),
            mount.clone(),
        );

        router.resolve("/a").await;
        router.resolve("/a").await;
        assert_eq!(calls.get(), 1, "second resolve must not invoke the producer");
        assert_eq!(mount.inner_html(), "A");
    }

    #[wasm_bindgen_test]
    async fn failed_producer_leaves_previous_content() {
        let mount = mount();
        let router = Router::new(
            table(vec![
                ("/a", static_route(PageKind::Other, "A")),
                ("/broken", failing_route()),
            ]),
            mount.clone(),
        );

        router.resolve("/a").await;
        assert_eq!(mount.inner_html(), "A");

        router.resolve("/broken").await;
        assert_eq!(mount.inner_html(), "A", "failure must not clear the screen");
        // The failed path is still recorded, so re-resolving it stays quiet
        // until a different navigation happens.
        assert_eq!(router.current_path(), "/broken");
    }

    #[wasm_bindgen_test]
    async fn setup_runs_once_for_matching_kind_only() {
        let mount = mount();
        let home_setups = Rc::new(Cell::new(0));
        let router = Router::new(
            table(vec![
                (
                    "/home",
                    static_route(PageKind::Home, "<form id=\"postForm\"></form>"),
                ),
                ("/plain", static_route(PageKind::Other, "plain")),
            ]),
            mount.clone(),
        );
        {
            let home_setups = home_setups.clone();
            router.on_page(
                PageKind::Home,
                Box::new(move |_router| home_setups.set(home_setups.get() + 1)),
            );
        }

        router.resolve("/home").await;
        assert_eq!(home_setups.get(), 1, "home setup runs exactly once");

        router.resolve("/plain").await;
        assert_eq!(home_setups.get(), 1, "other pages must not trigger it");
    }

    #[wasm_bindgen_test]
    async fn navigation_scenario_walkthrough() {
        let mount = mount();
        let router = Router::new(
            table(vec![
                ("/a", static_route(PageKind::Other, "A")),
                ("/b", static_route(PageKind::Other, "B")),
                (ROUTE_NOT_FOUND, static_route(PageKind::Other, "NF")),
            ]),
            mount.clone(),
        );

        // Initial render at /a.
        router.resolve("/a").await;
        assert_eq!(mount.inner_html(), "A");

        router.resolve("/b").await;
        assert_eq!(mount.inner_html(), "B");

        // Simulated pop back to /a.
        router.resolve("/a").await;
        assert_eq!(mount.inner_html(), "A");

        router.resolve("/unknown").await;
        assert_eq!(mount.inner_html(), "NF");
    }

    #[wasm_bindgen_test]
    async fn stale_producer_cannot_overwrite_newer_render() {
        let mount = mount();
        let router = Router::new(
            table(vec![
                ("/slow", slow_route(PageKind::Other, "SLOW", 80)),
                ("/fast", static_route(PageKind::Other, "FAST")),
            ]),
            mount.clone(),
        );

        {
            let router = router.clone();
            spawn_local(async move {
                router.resolve("/slow").await;
            });
        }
        // Let the slow producer start, then navigate away before it settles.
        TimeoutFuture::new(10).await;
        router.resolve("/fast").await;
        assert_eq!(mount.inner_html(), "FAST");

        // Wait out the slow producer; its result must be discarded.
        TimeoutFuture::new(150).await;
        assert_eq!(mount.inner_html(), "FAST");
    }
}
