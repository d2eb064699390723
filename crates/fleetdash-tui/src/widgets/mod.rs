//! Custom widget components

mod category_menu;
mod detail_modal;
mod header;
mod machine_grid;
pub mod modal_overlay;
mod status_bar;

pub use category_menu::CategoryMenu;
pub use detail_modal::DetailModal;
pub use header::MainHeader;
pub use machine_grid::{MachineGrid, CELL_HEIGHT, CELL_WIDTH};
pub use status_bar::StatusBar;
