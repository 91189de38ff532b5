#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// Short notice shown at the bottom of the screen after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn info(text: &str) -> Status {
        return Status {
            kind: StatusKind::Info,
            text: text.to_string(),
        };
    }

    pub fn warning(text: &str) -> Status {
        return Status {
            kind: StatusKind::Warning,
            text: text.to_string(),
        };
    }

    pub fn error(text: &str) -> Status {
        return Status {
            kind: StatusKind::Error,
            text: text.to_string(),
        };
    }
}
