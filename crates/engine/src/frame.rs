//! Per-algorithm activation bodies
//!
//! A [`Frame`] holds one activation's arguments. [`Frame::advance`] decides,
//! given the child results collected so far, whether the activation issues
//! another recursive call or returns.

use callscope_core::{Algorithm, Input, Locals};

/// Arguments of one activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Factorial { n: i64 },
    Fibonacci { n: i64 },
    Gcd { a: i64, b: i64 },
    Power { base: i64, exponent: i64 },
    SumArray { index: usize },
}

/// Why an activation could not advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fault {
    /// Checked arithmetic failed; carries the operation text
    Overflow(String),
    /// Resumed with a child-result count the algorithm never produces
    Resume(usize),
}

/// What an activation does next
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Next {
    /// Issue a recursive call
    Recurse(Frame),
    /// Produce a value
    Return { value: i64, locals: Locals },
}

impl Frame {
    /// Root frame for a validated input
    pub(crate) fn root(input: &Input) -> Frame {
        match input {
            Input::Factorial { n } => Frame::Factorial { n: *n },
            Input::Fibonacci { n } => Frame::Fibonacci { n: *n },
            Input::Gcd { a, b } => Frame::Gcd { a: *a, b: *b },
            Input::Power { base, exponent } => Frame::Power {
                base: *base,
                exponent: *exponent,
            },
            Input::SumArray { .. } => Frame::SumArray { index: 0 },
        }
    }

    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            Frame::Factorial { .. } => Algorithm::Factorial,
            Frame::Fibonacci { .. } => Algorithm::Fibonacci,
            Frame::Gcd { .. } => Algorithm::Gcd,
            Frame::Power { .. } => Algorithm::Power,
            Frame::SumArray { .. } => Algorithm::SumArray,
        }
    }

    pub(crate) fn arguments(&self) -> String {
        match self {
            Frame::Factorial { n } | Frame::Fibonacci { n } => format!("n={}", n),
            Frame::Gcd { a, b } => format!("a={},b={}", a, b),
            Frame::Power { base, exponent } => format!("base={},exponent={}", base, exponent),
            Frame::SumArray { index } => format!("index={}", index),
        }
    }

    /// Locals visible on entry, before any recursion
    pub(crate) fn entry_locals(&self, values: &[i64]) -> Locals {
        match *self {
            Frame::Factorial { n } | Frame::Fibonacci { n } => Locals::new().with("n", n),
            Frame::Gcd { a, b } => {
                let mut locals = Locals::new().with("a", a).with("b", b);
                if let Some(remainder) = a.checked_rem(b) {
                    locals.insert("remainder", remainder);
                }
                locals
            }
            Frame::Power { base, exponent } => {
                Locals::new().with("base", base).with("exponent", exponent)
            }
            Frame::SumArray { index } => {
                let mut locals = Locals::new()
                    .with("index", index as i64)
                    .with("length", values.len() as i64);
                if let Some(current) = values.get(index) {
                    locals.insert("current", *current);
                }
                locals
            }
        }
    }

    /// Decide the next move given the child results received so far
    pub(crate) fn advance(&self, results: &[i64], values: &[i64]) -> Result<Next, Fault> {
        let locals = self.entry_locals(values);
        match (*self, results) {
            (Frame::Factorial { n }, []) if n <= 1 => Ok(returning(locals, 1)),
            (Frame::Factorial { n }, []) => Ok(Next::Recurse(Frame::Factorial { n: n - 1 })),
            (Frame::Factorial { n }, [sub]) => {
                let value = n
                    .checked_mul(*sub)
                    .ok_or_else(|| Fault::Overflow(format!("{} * {}", n, sub)))?;
                Ok(returning(locals.with("subresult", *sub), value))
            }

            (Frame::Fibonacci { n }, []) if n <= 1 => Ok(returning(locals, n)),
            (Frame::Fibonacci { n }, []) => Ok(Next::Recurse(Frame::Fibonacci { n: n - 1 })),
            (Frame::Fibonacci { n }, [_]) => Ok(Next::Recurse(Frame::Fibonacci { n: n - 2 })),
            (Frame::Fibonacci { .. }, [a, b]) => {
                let value = a
                    .checked_add(*b)
                    .ok_or_else(|| Fault::Overflow(format!("{} + {}", a, b)))?;
                Ok(returning(locals.with("a", *a).with("b", *b), value))
            }

            (Frame::Gcd { a, b: 0 }, []) => Ok(returning(locals, a)),
            (Frame::Gcd { a, b }, []) => {
                let remainder = a
                    .checked_rem(b)
                    .ok_or_else(|| Fault::Overflow(format!("{} % {}", a, b)))?;
                Ok(Next::Recurse(Frame::Gcd { a: b, b: remainder }))
            }
            (Frame::Gcd { .. }, [sub]) => Ok(returning(locals, *sub)),

            (Frame::Power { exponent: 0, .. }, []) => Ok(returning(locals, 1)),
            (Frame::Power { base, exponent }, []) => Ok(Next::Recurse(Frame::Power {
                base,
                exponent: exponent - 1,
            })),
            (Frame::Power { base, .. }, [sub]) => {
                let value = base
                    .checked_mul(*sub)
                    .ok_or_else(|| Fault::Overflow(format!("{} * {}", base, sub)))?;
                Ok(returning(locals.with("subresult", *sub), value))
            }

            (Frame::SumArray { index }, []) if index >= values.len() => Ok(returning(locals, 0)),
            (Frame::SumArray { index }, []) => {
                Ok(Next::Recurse(Frame::SumArray { index: index + 1 }))
            }
            (Frame::SumArray { index }, [sub]) => {
                let current = values[index];
                let value = current
                    .checked_add(*sub)
                    .ok_or_else(|| Fault::Overflow(format!("{} + {}", current, sub)))?;
                Ok(returning(locals.with("subresult", *sub), value))
            }

            (_, results) => Err(Fault::Resume(results.len())),
        }
    }
}

fn returning(locals: Locals, value: i64) -> Next {
    Next::Return {
        value,
        locals: locals.with("result", value),
    }
}
