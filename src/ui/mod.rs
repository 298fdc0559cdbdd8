pub mod layout;
mod matrix;
mod setup;
mod summary;

pub use layout::{calculate_matrix_chunks, calculate_summary_chunks};
pub use matrix::{draw_matrix, draw_quit_confirmation};
pub use setup::draw_setup;
pub use summary::{draw_summary, summary_lines};
