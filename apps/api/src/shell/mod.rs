// Application shell: which page is showing, who may see it, which URL it
// lives at and which view renders it. Everything here except the handlers is
// pure and synchronous.

pub mod guard;
pub mod handlers;
pub mod navigator;
pub mod page;
pub mod registry;
pub mod view;

