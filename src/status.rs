use std::fmt;
use std::path::PathBuf;

/// What the status line under the text panes currently says.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    #[default]
    Ready,
    Waiting,
    Translating,
    Translated { elapsed_ms: f64 },
    Failed(String),
    NeedSourceLanguage,
    Copied,
    Saved(PathBuf),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Prêt"),
            Status::Waiting => write!(f, "En attente..."),
            Status::Translating => write!(f, "Traduction..."),
            Status::Translated { elapsed_ms } => write!(f, "OK {} ms", elapsed_ms),
            Status::Failed(msg) => write!(f, "Erreur: {}", msg),
            Status::NeedSourceLanguage => write!(f, "Choisis une langue source pour inverser"),
            Status::Copied => write!(f, "Copié"),
            Status::Saved(path) => write!(f, "Enregistré: {}", path.display()),
        }
    }
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Failed(_) | Status::NeedSourceLanguage)
    }
}
