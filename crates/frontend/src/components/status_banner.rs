use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One user-visible status line. Exactly one shows at a time — setting a
/// new status replaces whatever was there.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Status {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            StatusKind::Info => "status status-info",
            StatusKind::Success => "status status-success",
            StatusKind::Error => "status status-error",
        }
    }
}

#[component]
pub fn StatusBanner(status: ReadSignal<Option<Status>>) -> Element {
    match &*status.read() {
        Some(s) => rsx! {
            div { class: "{s.class()}", "{s.message}" }
        },
        None => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(Status::info("a").class(), "status status-info");
        assert_eq!(Status::success("b").class(), "status status-success");
        assert_eq!(Status::error("c").class(), "status status-error");
    }

    #[test]
    fn test_status_keeps_message() {
        let s = Status::error("Erro ao enviar foto. Tente novamente.");
        assert_eq!(s.message, "Erro ao enviar foto. Tente novamente.");
        assert_eq!(s.kind, StatusKind::Error);
    }
}
