// Models module

pub mod item;

// Re-export commonly used types
pub use item::Item;
