//! The catalogue of traceable algorithms
//!
//! The supported set is fixed. Each [`Algorithm`] maps to a static
//! [`AlgorithmDescriptor`] carrying display metadata for front ends.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// A supported recursive algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// n! = n * (n-1)!
    Factorial,
    /// F(n) = F(n-1) + F(n-2)
    Fibonacci,
    /// Euclidean greatest common divisor
    Gcd,
    /// base^exponent by repeated multiplication
    Power,
    /// Sum of array elements from an index onwards
    SumArray,
}

/// Static metadata for one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    /// The algorithm described
    pub algorithm: Algorithm,
    /// Human-readable name
    pub name: &'static str,
    /// One-paragraph description
    pub description: &'static str,
    /// Time complexity in big-O notation
    pub time_complexity: &'static str,
    /// Space complexity in big-O notation
    pub space_complexity: &'static str,
    /// Labels for each input field, in order
    pub input_labels: &'static [&'static str],
    /// Largest input magnitude that still traces comfortably
    ///
    /// Advisory only. See [`crate::Input::magnitude`] for what is compared.
    pub recommended_max: i64,
}

const DESCRIPTORS: [AlgorithmDescriptor; 5] = [
    AlgorithmDescriptor {
        algorithm: Algorithm::Factorial,
        name: "Factorial",
        description: "Calculates n! = n × (n-1) × ... × 1. The factorial of a non-negative \
                      integer n is the product of all positive integers less than or equal to n.",
        time_complexity: "O(n)",
        space_complexity: "O(n)",
        input_labels: &["n"],
        recommended_max: 12,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Fibonacci,
        name: "Fibonacci",
        description: "Calculates the nth Fibonacci number, where F(n) = F(n-1) + F(n-2) \
                      with base cases F(0) = 0 and F(1) = 1.",
        time_complexity: "O(2^n)",
        space_complexity: "O(n)",
        input_labels: &["n"],
        recommended_max: 15,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Gcd,
        name: "Greatest Common Divisor",
        description: "Finds the largest positive integer that divides both numbers without \
                      a remainder using the Euclidean algorithm.",
        time_complexity: "O(log(min(a,b)))",
        space_complexity: "O(log(min(a,b)))",
        input_labels: &["a", "b"],
        recommended_max: 100,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Power,
        name: "Power Function",
        description: "Calculates base^exponent using recursive multiplication.",
        time_complexity: "O(n)",
        space_complexity: "O(n)",
        input_labels: &["base", "exponent"],
        recommended_max: 10,
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::SumArray,
        name: "Sum of Array",
        description: "Recursively calculates the sum of all elements in an array.",
        time_complexity: "O(n)",
        space_complexity: "O(n)",
        input_labels: &["values"],
        recommended_max: 10,
    },
];

impl Algorithm {
    /// Every supported algorithm, in catalogue order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Factorial,
        Algorithm::Fibonacci,
        Algorithm::Gcd,
        Algorithm::Power,
        Algorithm::SumArray,
    ];

    /// Stable identifier used in events and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Factorial => "factorial",
            Algorithm::Fibonacci => "fibonacci",
            Algorithm::Gcd => "gcd",
            Algorithm::Power => "power",
            Algorithm::SumArray => "sum_array",
        }
    }

    /// Static metadata for this algorithm
    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        match self {
            Algorithm::Factorial => &DESCRIPTORS[0],
            Algorithm::Fibonacci => &DESCRIPTORS[1],
            Algorithm::Gcd => &DESCRIPTORS[2],
            Algorithm::Power => &DESCRIPTORS[3],
            Algorithm::SumArray => &DESCRIPTORS[4],
        }
    }

    /// Number of scalar arguments, or `None` for array input
    pub fn arity(&self) -> Option<usize> {
        match self {
            Algorithm::Factorial | Algorithm::Fibonacci => Some(1),
            Algorithm::Gcd | Algorithm::Power => Some(2),
            Algorithm::SumArray => None,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "factorial" | "fact" => Ok(Algorithm::Factorial),
            "fibonacci" | "fib" => Ok(Algorithm::Fibonacci),
            "gcd" => Ok(Algorithm::Gcd),
            "power" | "pow" => Ok(Algorithm::Power),
            "sum_array" | "sumarray" | "sum" => Ok(Algorithm::SumArray),
            _ => Err(ValidationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_matches_algorithm() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.descriptor().algorithm, algorithm);
        }
    }

    #[test]
    fn test_input_labels_match_arity() {
        for algorithm in Algorithm::ALL {
            let labels = algorithm.descriptor().input_labels.len();
            assert_eq!(algorithm.arity().unwrap_or(1), labels);
        }
    }

    #[test]
    fn test_parse_accepts_aliases() {
        assert_eq!("fib".parse::<Algorithm>().unwrap(), Algorithm::Fibonacci);
        assert_eq!("sumArray".parse::<Algorithm>().unwrap(), Algorithm::SumArray);
        assert_eq!(" GCD ".parse::<Algorithm>().unwrap(), Algorithm::Gcd);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "ackermann".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownAlgorithm("ackermann".into()));
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Algorithm::SumArray).unwrap();
        assert_eq!(json, "\"sum_array\"");
    }
}
