pub mod stack;

pub use stack::stack;
