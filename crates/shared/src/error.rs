use thiserror::Error;

/// Feed-load failures. An empty feed is not one of these — see
/// `feed::FeedPhase::Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("Erro HTTP: {status}")]
    Http { status: u16 },
    #[error("Erro de rede: {0}")]
    Network(String),
    #[error("Resposta inválida: {0}")]
    Decode(String),
}

/// Photo-upload failures. The service sends no structured error body, so
/// the status code is all we can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Erro na API: {status}")]
    Http { status: u16 },
    #[error("Erro de rede: {0}")]
    Network(String),
}

/// Geolocation failure kinds, mapped from the platform error taxonomy.
/// The display strings are the user-facing status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("Permissão de localização negada.")]
    PermissionDenied,
    #[error("Informações de localização indisponíveis.")]
    Unavailable,
    #[error("Tempo limite para obter localização excedido.")]
    Timeout,
    #[error("Erro desconhecido ao obter localização.")]
    Unknown,
}

impl GeoError {
    /// W3C Geolocation error codes: 1 permission denied, 2 position
    /// unavailable, 3 timeout. Anything else is unknown.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::Unavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unknown,
        }
    }
}

/// Camera acquisition failure. Opaque to the user — permission denial and
/// missing hardware get the same message; `detail` goes to the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Erro ao acessar a câmera. Verifique as permissões.")]
pub struct CameraError {
    pub detail: String,
}

impl CameraError {
    pub fn new(detail: impl Into<String>) -> Self {
        CameraError {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_error_code_mapping() {
        assert_eq!(GeoError::from_code(1), GeoError::PermissionDenied);
        assert_eq!(GeoError::from_code(2), GeoError::Unavailable);
        assert_eq!(GeoError::from_code(3), GeoError::Timeout);
        assert_eq!(GeoError::from_code(0), GeoError::Unknown);
        assert_eq!(GeoError::from_code(42), GeoError::Unknown);
    }

    #[test]
    fn test_geo_error_messages() {
        assert_eq!(
            GeoError::PermissionDenied.to_string(),
            "Permissão de localização negada."
        );
        assert_eq!(
            GeoError::Unavailable.to_string(),
            "Informações de localização indisponíveis."
        );
        assert_eq!(
            GeoError::Timeout.to_string(),
            "Tempo limite para obter localização excedido."
        );
        assert_eq!(
            GeoError::Unknown.to_string(),
            "Erro desconhecido ao obter localização."
        );
    }

    #[test]
    fn test_feed_error_message_carries_status() {
        let err = FeedError::Http { status: 500 };
        assert_eq!(err.to_string(), "Erro HTTP: 500");
    }

    #[test]
    fn test_upload_error_message_carries_status() {
        let err = UploadError::Http { status: 502 };
        assert_eq!(err.to_string(), "Erro na API: 502");
    }

    #[test]
    fn test_camera_error_message_is_generic() {
        let err = CameraError::new("NotAllowedError: Permission denied");
        assert_eq!(
            err.to_string(),
            "Erro ao acessar a câmera. Verifique as permissões."
        );
        assert!(err.detail.contains("NotAllowedError"));
    }
}
