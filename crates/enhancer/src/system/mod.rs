pub mod config;
pub mod enhancer;
pub mod host;
pub mod page_observer;
