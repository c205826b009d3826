pub mod format;
pub mod html;
pub mod links;
pub mod view;
