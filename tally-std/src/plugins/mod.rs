//! Standard plugins

mod factorial;
mod square_root;

pub use factorial::{
    factorial, parse_integer, Factorial, FACTORIAL_PROMPT, MAX_FACTORIAL_INPUT,
};
pub use square_root::{square_root, SquareRoot, SQUARE_ROOT_PROMPT};
