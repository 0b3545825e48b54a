use std::fmt;

/// Which kind of position a type is classified for.
///
/// Only parameters can take the output flag; return values never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Parameter,
    Return,
    Field,
}

impl Direction {
    pub const fn is_parameter(self) -> bool {
        matches!(self, Direction::Parameter)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Parameter => "parameter",
            Direction::Return => "return value",
            Direction::Field => "field",
        })
    }
}
