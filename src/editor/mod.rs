mod editor;
mod mode;

pub use editor::Editor;
pub use mode::Mode;
