pub mod sampling;
pub mod table;
pub mod variable;

pub use sampling::{DEFAULT_SEED, sample_indices};
pub use table::{Column, DataTable};
pub use variable::{Categorical, Category, Variable};
