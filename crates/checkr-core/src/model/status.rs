use std::fmt;

/// Occupancy status label reported by the endpoint.
///
/// Labels are matched exactly. Anything other than `"red"`, `"yellow"` or
/// `"green"` is kept verbatim in [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Red,
    Yellow,
    Green,
    Other(String),
}

impl Status {
    /// The label as it appeared on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        match label {
            "red" => Self::Red,
            "yellow" => Self::Yellow,
            "green" => Self::Green,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        match label.as_str() {
            "red" | "yellow" | "green" => Self::from(label.as_str()),
            _ => Self::Other(label),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_parse() {
        assert_eq!(Status::from("red"), Status::Red);
        assert_eq!(Status::from("yellow"), Status::Yellow);
        assert_eq!(Status::from("green".to_owned()), Status::Green);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Status::from("RED"), Status::Other("RED".into()));
    }

    #[test]
    fn unknown_label_round_trips_through_display() {
        let status = Status::from("purple".to_owned());
        assert_eq!(status.to_string(), "purple");
    }
}
