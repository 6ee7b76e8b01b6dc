//! Factorial plugin

use dashu_int::IBig;
use tally_plugin::prelude::*;
use tracing::debug;

pub struct Factorial;

pub const FACTORIAL_PROMPT: &str = "Enter a number to calculate its factorial: ";

/// Parse a whole number typed by the user
pub fn parse_integer(text: &str) -> Result<i64, CalcError> {
    let trimmed = text.trim();
    trimmed.parse::<i64>().map_err(|_| {
        CalcError::invalid_input(format!("could not convert {:?} to an integer", trimmed))
    })
}

/// Largest accepted input; 10000! already has 35660 digits
pub const MAX_FACTORIAL_INPUT: i64 = 10_000;

/// n! computed exactly; 0! = 1
pub fn factorial(n: i64) -> Result<IBig, CalcError> {
    if n < 0 {
        return Err(CalcError::domain_error("Factorial is not defined for negative numbers."));
    }
    if n > MAX_FACTORIAL_INPUT {
        return Err(CalcError::domain_error(format!(
            "Factorial is only supported up to {}.",
            MAX_FACTORIAL_INPUT
        )));
    }
    let mut result = IBig::ONE;
    for i in 2..=n {
        result *= IBig::from(i);
    }
    Ok(result)
}

impl CommandPlugin for Factorial {
    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: "factorial",
            description: "Calculates the factorial of a given number.",
        }
    }

    fn execute(&self, ctx: &mut PluginContext<'_>) -> Result<(), ExecuteError> {
        let answer = ctx.prompt(FACTORIAL_PROMPT)?;

        let n = match parse_integer(&answer) {
            Ok(n) => n,
            Err(e) => {
                debug!(input = %answer, error = %e, "factorial input rejected");
                return ctx.say("Error: Invalid input for factorial. Please enter a valid number.");
            }
        };
        let result = match factorial(n) {
            Ok(r) => r,
            Err(e) => return ctx.say(e),
        };

        ctx.say(format!("The factorial of {} is {}", n, result))?;
        ctx.history().save_single("factorial", n, result)?;
        Ok(())
    }
}
