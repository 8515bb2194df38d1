// Fixed application chrome: everything outside the router's mount element.

pub mod setup;
pub mod theme;
