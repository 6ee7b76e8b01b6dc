//! Square root plugin
//!
//! Negative inputs have a purely imaginary root, recorded and shown as
//! `Nj` (`-4` → `2j`).

use tally_core::arithmetic::parse_real;
use tally_core::format_real;
use tally_plugin::prelude::*;
use tracing::debug;

pub struct SquareRoot;

pub const SQUARE_ROOT_PROMPT: &str = "Enter a number to calculate the square root: ";

/// Non-negative real root, or the imaginary root of a negative number
pub fn square_root(x: f64) -> Number {
    if x < 0.0 {
        Number::Imaginary((-x).sqrt())
    } else {
        Number::Real(x.sqrt())
    }
}

impl CommandPlugin for SquareRoot {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: "square_root",
            description: "Calculates the square root of a given number.",
        }
    }

    fn execute(&self, ctx: &mut PluginContext<'_>) -> Result<(), ExecuteError> {
        let answer = ctx.prompt(SQUARE_ROOT_PROMPT)?;

        let x = match parse_real(&answer) {
            Ok(x) => x,
            Err(e) => {
                debug!(input = %answer, error = %e, "square root input rejected");
                return ctx.say("Error: Invalid input for square root. Please enter a valid number.");
            }
        };
        let result = square_root(x);

        ctx.say(format!("The square root of {} is {}", format_real(x), result))?;
        ctx.history().save_single("square_root", x, result)?;
        Ok(())
    }
}
