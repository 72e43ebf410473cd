//! sitekit - page enhancement for static sites.
//!
//! A mobile navigation toggle, client-side substring search over a
//! preloaded index, and a slide carousel. Each component is a state machine
//! that turns page events into [`page::Effect`]s; a [`page::Surface`]
//! applies them to whatever displays the page.

pub mod carousel;
pub mod cli;
pub mod config;
pub mod markup;
pub mod nav;
pub mod page;
pub mod search;
pub mod server;
