pub mod selection;

pub use selection::SelectionStore;
