//! Untraced reference implementations
//!
//! Plain recursion with the same checked arithmetic as the traced
//! evaluator. A traced run must always agree with these.

use callscope_core::Input;

/// Evaluate `input` directly; `None` on arithmetic overflow
pub fn evaluate(input: &Input) -> Option<i64> {
    match input {
        Input::Factorial { n } => factorial(*n),
        Input::Fibonacci { n } => fibonacci(*n),
        Input::Gcd { a, b } => gcd(*a, *b),
        Input::Power { base, exponent } => power(*base, *exponent),
        Input::SumArray { values } => sum_array(values, 0),
    }
}

fn factorial(n: i64) -> Option<i64> {
    if n <= 1 {
        return Some(1);
    }
    n.checked_mul(factorial(n - 1)?)
}

fn fibonacci(n: i64) -> Option<i64> {
    if n <= 1 {
        return Some(n);
    }
    fibonacci(n - 1)?.checked_add(fibonacci(n - 2)?)
}

fn gcd(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return Some(a);
    }
    gcd(b, a.checked_rem(b)?)
}

fn power(base: i64, exponent: i64) -> Option<i64> {
    if exponent == 0 {
        return Some(1);
    }
    base.checked_mul(power(base, exponent - 1)?)
}

fn sum_array(values: &[i64], index: usize) -> Option<i64> {
    match values.get(index) {
        None => Some(0),
        Some(current) => current.checked_add(sum_array(values, index + 1)?),
    }
}
