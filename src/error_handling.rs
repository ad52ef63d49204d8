use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// The step that was running when an error came up
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Stage {
    Validation,
    StartSymbol,
    UnitProductions,
    Terminals,
    Binarization,
    Generation,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Validation => "validation",
            Stage::StartSymbol => "start symbol",
            Stage::UnitProductions => "unit productions",
            Stage::Terminals => "terminals",
            Stage::Binarization => "binarization",
            Stage::Generation => "generation",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Stage,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn new(location: Stage, error: T) -> Self {
        Error { location, error }
    }

    // Rewraps the error kind while keeping where it happened
    pub fn map<U: ErrorType>(self, f: impl FnOnce(T) -> U) -> Error<U> {
        Error {
            location: self.location,
            error: f(self.error)
        }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
