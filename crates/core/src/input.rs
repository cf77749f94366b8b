//! Algorithm inputs
//!
//! An [`Input`] pairs an algorithm with its arguments. Construction never
//! fails; [`Input::validate`] checks the algorithm's domain and is called by
//! the evaluator before any event is produced.

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::ValidationError;

/// Arguments for one run of one algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Input {
    /// factorial(n), n >= 0
    Factorial {
        /// Operand
        n: i64,
    },
    /// fibonacci(n), n >= 0
    Fibonacci {
        /// Index into the sequence
        n: i64,
    },
    /// gcd(a, b), b >= 0
    Gcd {
        /// Dividend
        a: i64,
        /// Divisor
        b: i64,
    },
    /// power(base, exponent), exponent >= 0
    Power {
        /// Base
        base: i64,
        /// Exponent
        exponent: i64,
    },
    /// sum_array(values, 0), values non-empty
    SumArray {
        /// Elements to sum
        values: Vec<i64>,
    },
}

impl Input {
    /// The algorithm this input is for
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Input::Factorial { .. } => Algorithm::Factorial,
            Input::Fibonacci { .. } => Algorithm::Fibonacci,
            Input::Gcd { .. } => Algorithm::Gcd,
            Input::Power { .. } => Algorithm::Power,
            Input::SumArray { .. } => Algorithm::SumArray,
        }
    }

    /// Check the input against the algorithm's domain
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Input::Factorial { n } | Input::Fibonacci { n } => non_negative("n", *n),
            Input::Gcd { b, .. } => non_negative("b", *b),
            Input::Power { exponent, .. } => non_negative("exponent", *exponent),
            Input::SumArray { values } if values.is_empty() => Err(ValidationError::EmptyArray),
            Input::SumArray { .. } => Ok(()),
        }
    }

    /// The quantity compared against the descriptor's `recommended_max`
    ///
    /// - factorial, fibonacci: n
    /// - gcd: the larger operand magnitude
    /// - power: the exponent
    /// - sum_array: the element count
    pub fn magnitude(&self) -> i64 {
        match self {
            Input::Factorial { n } | Input::Fibonacci { n } => *n,
            Input::Gcd { a, b } => a.saturating_abs().max(b.saturating_abs()),
            Input::Power { exponent, .. } => *exponent,
            Input::SumArray { values } => i64::try_from(values.len()).unwrap_or(i64::MAX),
        }
    }

    /// True when the input is larger than the algorithm traces comfortably
    pub fn exceeds_recommended(&self) -> bool {
        self.magnitude() > self.algorithm().descriptor().recommended_max
    }

    /// Parse textual input for `algorithm`
    ///
    /// Arguments are comma-separated integers: `"5"`, `"48, 18"`,
    /// `"1,2,3,4"`. Parsing checks syntax and arity only; call
    /// [`Input::validate`] for the domain.
    pub fn parse(algorithm: Algorithm, text: &str) -> Result<Input, ValidationError> {
        let values = parse_integers(text)?;

        if let Some(expected) = algorithm.arity() {
            if values.len() != expected {
                return Err(ValidationError::Arity {
                    algorithm,
                    expected,
                    found: values.len(),
                });
            }
        }

        Ok(match algorithm {
            Algorithm::Factorial => Input::Factorial { n: values[0] },
            Algorithm::Fibonacci => Input::Fibonacci { n: values[0] },
            Algorithm::Gcd => Input::Gcd {
                a: values[0],
                b: values[1],
            },
            Algorithm::Power => Input::Power {
                base: values[0],
                exponent: values[1],
            },
            Algorithm::SumArray => Input::SumArray { values },
        })
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Factorial { n } => write!(f, "factorial({})", n),
            Input::Fibonacci { n } => write!(f, "fibonacci({})", n),
            Input::Gcd { a, b } => write!(f, "gcd({}, {})", a, b),
            Input::Power { base, exponent } => write!(f, "power({}, {})", base, exponent),
            Input::SumArray { values } => write!(f, "sum_array({:?})", values),
        }
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        Err(ValidationError::Negative { name, value })
    } else {
        Ok(())
    }
}

fn parse_integers(text: &str) -> Result<Vec<i64>, ValidationError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|_| ValidationError::NotAnInteger {
                    input: token.to_string(),
                })
        })
        .collect()
}
