// Page-level modules: each page exports a markup producer for the route
// table and a setup routine the router runs after rendering that page.

pub mod auth;
pub mod home;
pub mod messages;
pub mod not_found;
pub mod profile;

use std::collections::HashMap;
use std::rc::Rc;

use crate::constants::{
    ROUTE_HOME, ROUTE_LOGIN, ROUTE_MESSAGES, ROUTE_NOT_FOUND, ROUTE_PROFILE, ROUTE_REGISTER,
    ROUTE_ROOT,
};
use crate::router::{PageKind, Producer, Router};
use crate::state::AppContext;

/// The application's route table. Immutable once handed to the router;
/// `"/404"` is the reserved fallback entry.
pub fn route_table(ctx: &Rc<AppContext>) -> HashMap<String, Producer> {
    let mut routes: HashMap<String, Producer> = HashMap::new();
    routes.insert(ROUTE_ROOT.to_string(), home::producer(ctx));
    routes.insert(ROUTE_HOME.to_string(), home::producer(ctx));
    routes.insert(ROUTE_PROFILE.to_string(), profile::producer(ctx));
    routes.insert(ROUTE_MESSAGES.to_string(), messages::producer(ctx));
    routes.insert(ROUTE_LOGIN.to_string(), auth::login_producer(ctx));
    routes.insert(ROUTE_REGISTER.to_string(), auth::register_producer(ctx));
    routes.insert(ROUTE_NOT_FOUND.to_string(), not_found::producer());
    routes
}

/// Register one setup routine per page kind.
pub fn register_setups(router: &Rc<Router>, ctx: &Rc<AppContext>) {
    router.on_page(PageKind::Home, home::setup(ctx));
    router.on_page(PageKind::Profile, profile::setup(ctx));
    router.on_page(PageKind::Messages, messages::setup(ctx));
    router.on_page(PageKind::Login, auth::setup_login(ctx));
    router.on_page(PageKind::Register, auth::setup_register(ctx));
}
