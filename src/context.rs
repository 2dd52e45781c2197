//! Scoped defaults for where images live and which column names them.
//!
//! The context is thread-local. [`data_context`] installs a new context and
//! returns a guard; dropping the guard restores whatever was active before,
//! so scopes nest.
//!
//! ```
//! use mosaic_rs::context::{data_context, get_image_col, get_image_dir};
//!
//! {
//!     let _ctx = data_context("image_path", "/data/images");
//!     assert_eq!(get_image_dir(), "/data/images");
//!     assert_eq!(get_image_col().as_deref(), Some("image_path"));
//! }
//! assert_eq!(get_image_dir(), "");
//! ```

use std::cell::RefCell;

use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataContext {
    pub image_col: Option<String>,
    pub image_dir: String,
    pub image_files: Option<Vec<String>>,
}

impl DataContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image_col(mut self, image_col: impl Into<String>) -> Self {
        self.image_col = Some(image_col.into());
        self
    }

    #[must_use]
    pub fn with_image_dir(mut self, image_dir: impl Into<String>) -> Self {
        self.image_dir = image_dir.into();
        self
    }

    /// Explicit image file list used when a plot names no image source.
    #[must_use]
    pub fn with_image_files(mut self, files: Vec<String>) -> Self {
        self.image_files = Some(files);
        self
    }

    /// Installs this context until the returned guard is dropped.
    #[must_use = "the context is cleared as soon as the guard is dropped"]
    pub fn enter(self) -> DataContextGuard {
        trace!(image_col = ?self.image_col, image_dir = %self.image_dir, "enter data context");
        let previous = CURRENT.with(|current| current.replace(self));
        DataContextGuard { previous }
    }
}

thread_local! {
    static CURRENT: RefCell<DataContext> = RefCell::new(DataContext::default());
}

/// Restores the previously active context on drop.
#[derive(Debug)]
pub struct DataContextGuard {
    previous: DataContext,
}

impl Drop for DataContextGuard {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        CURRENT.with(|current| {
            current.replace(previous);
        });
        trace!("leave data context");
    }
}

/// Sets the image column and directory for the current scope.
#[must_use = "the context is cleared as soon as the guard is dropped"]
pub fn data_context(image_col: impl Into<String>, image_dir: impl Into<String>) -> DataContextGuard {
    DataContext::new()
        .with_image_col(image_col)
        .with_image_dir(image_dir)
        .enter()
}

/// Sets only the image directory for the current scope.
#[must_use = "the context is cleared as soon as the guard is dropped"]
pub fn image_dir_context(image_dir: impl Into<String>) -> DataContextGuard {
    DataContext::new().with_image_dir(image_dir).enter()
}

#[must_use]
pub fn get_data_context() -> DataContext {
    CURRENT.with(|current| current.borrow().clone())
}

#[must_use]
pub fn get_image_dir() -> String {
    CURRENT.with(|current| current.borrow().image_dir.clone())
}

#[must_use]
pub fn get_image_col() -> Option<String> {
    CURRENT.with(|current| current.borrow().image_col.clone())
}

#[must_use]
pub fn get_image_files() -> Option<Vec<String>> {
    CURRENT.with(|current| current.borrow().image_files.clone())
}
