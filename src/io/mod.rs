pub mod directory;
pub mod loader;
pub mod paths;
pub mod source;

pub use directory::{IMAGE_PATH_COLUMN, directory_to_table, load_from_directory};
pub use loader::{load_image, load_images, resize_image, resize_images};
pub use paths::{IMAGE_EXTENSIONS, image_files_in, image_path, is_image_file, sample_images};
pub use source::{ImageSource, resolve_image_files, resolve_images};
