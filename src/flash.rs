//! One-shot notices carried across a redirect in a `flash` cookie.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

const COOKIE_NAME: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Danger,
}

impl FlashKind {
    /// Bootstrap alert category used when rendering.
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    UrlAdded,
    UrlExists,
    CheckSucceeded,
    CheckRemoteError,
    CheckUnreachable,
    CheckNotSaved,
}

impl Flash {
    const ALL: [Flash; 6] = [
        Flash::UrlAdded,
        Flash::UrlExists,
        Flash::CheckSucceeded,
        Flash::CheckRemoteError,
        Flash::CheckUnreachable,
        Flash::CheckNotSaved,
    ];

    pub fn kind(self) -> FlashKind {
        match self {
            Self::UrlAdded | Self::UrlExists | Self::CheckSucceeded => FlashKind::Success,
            Self::CheckRemoteError => FlashKind::Error,
            Self::CheckUnreachable | Self::CheckNotSaved => FlashKind::Danger,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::UrlAdded => "Страница успешно добавлена",
            Self::UrlExists => "Страница уже существует",
            Self::CheckSucceeded => "Страница успешно проверена",
            Self::CheckRemoteError => {
                "Проверка была выполнена успешно, но сервер ответил с ошибкой"
            }
            Self::CheckUnreachable => "Произошла ошибка при проверке, не удалось подключиться",
            Self::CheckNotSaved => "Произошла ошибка при сохранении проверки",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::UrlAdded => "url_added",
            Self::UrlExists => "url_exists",
            Self::CheckSucceeded => "check_ok",
            Self::CheckRemoteError => "check_remote_error",
            Self::CheckUnreachable => "check_unreachable",
            Self::CheckNotSaved => "check_not_saved",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    /// `Set-Cookie` value that hands this notice to the next page.
    pub fn set_cookie(self) -> String {
        format!("{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax", self.code())
    }

    /// `Set-Cookie` value that drops a consumed notice.
    pub fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static("flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
    }

    /// Reads the pending notice from request headers. Unknown values are ignored.
    pub fn from_request(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, code)| Self::from_code(code.trim()))
    }
}

/// Whether the request carried a `flash` cookie at all, recognised or not.
pub fn has_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .any(|pair| pair.trim().split('=').next() == Some(COOKIE_NAME))
}

/// Appends the cookie that consumes any pending notice.
pub fn clear_on(headers: &mut HeaderMap) {
    headers.append(SET_COOKIE, Flash::clear_cookie());
}
