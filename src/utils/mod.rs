mod readers;
mod util;

pub use readers::{load_variant_index, open_text_reader};
pub use util::{create_writer, handle_error_and_exit, Result};
